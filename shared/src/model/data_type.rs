/// A primitive field type, carrying the value new instances start with
#[derive(Clone, Debug, PartialEq)]
pub enum DataType {
    Number(f64),
    String(String),
    Boolean(bool),
}

impl DataType {
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Number(_) => "number",
            DataType::String(_) => "string",
            DataType::Boolean(_) => "boolean",
        }
    }
}

pub fn number() -> DataType {
    DataType::Number(0.0)
}

pub fn number_with(default: f64) -> DataType {
    DataType::Number(default)
}

pub fn string() -> DataType {
    DataType::String(String::new())
}

pub fn string_with(default: impl Into<String>) -> DataType {
    DataType::String(default.into())
}

pub fn boolean() -> DataType {
    DataType::Boolean(false)
}

pub fn boolean_with(default: bool) -> DataType {
    DataType::Boolean(default)
}
