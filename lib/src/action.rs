use serde_json::Value;
use turn_program::{error::ActionError, traits::TurnActionSerialization};

use crate::grid::{COLUMN_COUNT, SIZE};

/// Wire index of column `(x, y)`.
pub fn column_index(x: u8, y: u8) -> u8 {
    y * SIZE as u8 + x
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Drop { x: u8, y: u8 }, // Column the disc falls into
}

impl GameAction {
    pub fn from_index(index: u8) -> Result<Self, ActionError> {
        if usize::from(index) >= COLUMN_COUNT {
            return Err(ActionError::OutOfBounds("column"));
        }
        Ok(GameAction::Drop {
            x: index % SIZE as u8,
            y: index / SIZE as u8,
        })
    }

    pub fn index(&self) -> u8 {
        match *self {
            GameAction::Drop { x, y } => column_index(x, y),
        }
    }
}

impl TurnActionSerialization for GameAction {
    fn deserialize(action: &[u8]) -> Result<(Self, &[u8]), ActionError> {
        let (&index, rest) = action.split_first().ok_or(ActionError::Empty)?;
        Ok((GameAction::from_index(index)?, rest))
    }

    fn serialize_json(json_str: &str) -> Result<Vec<u8>, ActionError> {
        let action: Value =
            serde_json::from_str(json_str).map_err(|e| ActionError::InvalidJson(e.to_string()))?;

        if let Some(index) = action.as_u64() {
            let index = u8::try_from(index).map_err(|_| ActionError::OutOfBounds("column"))?;
            return Ok(vec![GameAction::from_index(index)?.index()]);
        }

        let action_type = action["action"]
            .as_str()
            .ok_or(ActionError::MissingField("action"))?;
        let data = action["data"]
            .as_array()
            .ok_or(ActionError::MissingField("data"))?;

        match action_type {
            "Drop" => {
                if data.len() != 2 {
                    return Err(ActionError::InvalidLength {
                        action: "Drop",
                        expected: 2,
                        actual: data.len(),
                    });
                }
                let coord = |v: &Value, name: &'static str| {
                    v.as_u64()
                        .filter(|&n| n < SIZE as u64)
                        .map(|n| n as u8)
                        .ok_or(ActionError::OutOfBounds(name))
                };
                let x = coord(&data[0], "x")?;
                let y = coord(&data[1], "y")?;
                Ok(vec![column_index(x, y)])
            }
            other => Err(ActionError::InvalidType(other.to_string())),
        }
    }
}
