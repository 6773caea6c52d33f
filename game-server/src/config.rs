use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub daily_game_limit: u32,
    pub max_guesses: i32,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("Invalid PORT"),
            daily_game_limit: env::var("DAILY_GAME_LIMIT")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .expect("Invalid DAILY_GAME_LIMIT"),
            max_guesses: env::var("MAX_GUESSES")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("Invalid MAX_GUESSES"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
