use crate::types::err::ConfigError;

/// A bounded configuration value.
#[derive(Clone, Debug)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}

impl<T: Clone + PartialOrd> ConfigOption<T> {
    pub fn min_max(&self) -> (T, T) {
        (self.min.clone(), self.max.clone())
    }

    /// Sets the value of the option, if the value is within bounds.
    pub fn set(&mut self, value: T) -> Result<(), ConfigError> {
        match self.min <= value && value <= self.max {
            true => {
                self.value = value;
                Ok(())
            }
            false => Err(ConfigError::OutOfRange(self.name)),
        }
    }

    /// Whether the current value is within bounds.
    pub fn in_bounds(&self) -> bool {
        self.min <= self.value && self.value <= self.max
    }
}

impl<T: serde::Serialize> serde::Serialize for ConfigOption<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}
