use super::data_type::DataType;

/// The declared shape of one schema field
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    Primitive(DataType),
    Array(Box<Field>),
    Map(Box<Field>),
    Struct(Schema),
}

impl Field {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Field::Primitive(data_type) => data_type.name(),
            Field::Array(_) => "array",
            Field::Map(_) => "map",
            Field::Struct(_) => "struct",
        }
    }
}

impl From<DataType> for Field {
    fn from(data_type: DataType) -> Self {
        Field::Primitive(data_type)
    }
}

impl From<Schema> for Field {
    fn from(schema: Schema) -> Self {
        Field::Struct(schema)
    }
}

pub fn array_of(element: impl Into<Field>) -> Field {
    Field::Array(Box::new(element.into()))
}

pub fn map_of(element: impl Into<Field>) -> Field {
    Field::Map(Box::new(element.into()))
}

/// Field names mapped to field shapes, in declaration order.
///
/// Declaration order carries no meaning: collation sorts keys, so two
/// schemas declaring the same fields in a different order are equivalent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    fields: Vec<(String, Field)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, field: impl Into<Field>) -> Self {
        self.fields.push((key.into(), field.into()));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, field: impl Into<Field>) -> &mut Self {
        self.fields.push((key.into(), field.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(field_key, _)| field_key == key)
            .map(|(_, field)| field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(key, field)| (key.as_str(), field))
    }

    /// Fields sorted by byte-wise key order
    pub fn sorted_fields(&self) -> Vec<(&str, &Field)> {
        let mut fields: Vec<(&str, &Field)> = self.fields().collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));
        fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
