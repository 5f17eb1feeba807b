use serde::{Deserialize, Serialize};

/// A contact that sats can be sent to or bills split with.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct Friend {
    pub id: String,

    pub name: String,

    /// Display abbreviation, e.g. `AB` for `Alex B.`
    pub initials: String,

    pub address: String,
}

impl Friend {
    pub fn new(id: &str, name: &str, initials: &str, address: &str) -> Self {
        Friend {
            id: id.to_owned(),
            name: name.to_owned(),
            initials: initials.to_owned(),
            address: address.to_owned(),
        }
    }
}
