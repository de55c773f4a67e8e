use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroup(pub u32, pub u32, pub u32);

impl ResourceGroup {
    pub const fn new(food: u32, iron: u32, gold: u32) -> Self {
        Self(food, iron, gold)
    }

    pub fn total(&self) -> u32 {
        self.0 + self.1 + self.2
    }

    pub fn food(&self) -> u32 {
        self.0
    }
    pub fn iron(&self) -> u32 {
        self.1
    }
    pub fn gold(&self) -> u32 {
        self.2
    }
}
