use serde_json::Value;

/// A closed enumeration value-type over raw stored values.
///
/// Named `{schema_name}{FieldName}Enum` so that independently defined
/// schema types wrapping the same source field get distinct types.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumTy {
    pub name: String,
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    /// Display label, doubling as the member name.
    pub label: String,
    /// The raw stored value.
    pub value: Value,
}

impl EnumTy {
    pub fn contains(&self, value: &Value) -> bool {
        self.members.iter().any(|member| &member.value == value)
    }

    /// Maps a display label back to its raw value.
    pub fn value_for_label(&self, label: &str) -> Option<&Value> {
        self.members
            .iter()
            .find(|member| member.label == label)
            .map(|member| &member.value)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.members.iter().map(|member| &member.value)
    }

    /// The uniform JSON type of all member values, if there is one.
    pub fn uniform_json_type(&self) -> Option<&'static str> {
        let mut ty = None;
        for value in self.values() {
            let next = match value {
                Value::String(_) => "string",
                Value::Number(_) => "integer",
                Value::Bool(_) => "boolean",
                _ => return None,
            };
            match ty {
                None => ty = Some(next),
                Some(prev) if prev == next => {}
                Some(_) => return None,
            }
        }
        ty
    }
}
