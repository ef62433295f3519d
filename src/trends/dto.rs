use serde::Deserialize;

use super::series::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};

#[derive(Debug, Default, Deserialize)]
pub struct WindowParams {
    #[serde(default)]
    pub days: Option<u32>,
}

impl WindowParams {
    pub fn days(&self) -> u32 {
        self.days
            .unwrap_or(DEFAULT_WINDOW_DAYS)
            .clamp(1, MAX_WINDOW_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults_and_clamps() {
        assert_eq!(WindowParams::default().days(), 7);
        assert_eq!(WindowParams { days: Some(0) }.days(), 1);
        assert_eq!(WindowParams { days: Some(30) }.days(), 30);
        assert_eq!(WindowParams { days: Some(5000) }.days(), 365);
    }
}
