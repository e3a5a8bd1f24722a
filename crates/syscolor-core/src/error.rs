// ABOUTME: Error types raised while constructing or parsing colors.

/// A color channel, used to name the offender in [`ColorError::InvalidChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Alpha,
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const fn label(self) -> &'static str {
        match self {
            Channel::Alpha => "alpha",
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("'{value}' is not a valid value for '{channel}'. '{channel}' should be greater or equal to 0 and less than or equal to 255.")]
    InvalidChannel { channel: Channel, value: i32 },

    #[error("Cannot parse color: {0:?}")]
    Parse(String),
}
