//! 환경 변수 기반 설정 관리

use std::env;
use std::str::FromStr;

/// 서버 설정
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub game: GameConfig,
    pub log_level: String,
}

/// 게임 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub room_id: String,
    /// 라운드 제한 시간 (초)
    pub round_seconds: u32,
    /// 추측 1회당 제한 시간 (초)
    pub guess_seconds: u32,
    pub points_per_guess: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            room_id: "main-room".to_string(),
            round_seconds: 60,
            guess_seconds: 10,
            points_per_guess: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 4000,
            host: "0.0.0.0".to_string(),
            cors_origins: vec!["*".to_string()],
            game: GameConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            port: parse_var("PORT", defaults.port),
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            game: GameConfig {
                room_id: env::var("ROOM_ID").unwrap_or(defaults.game.room_id),
                round_seconds: parse_positive("ROUND_SECONDS", defaults.game.round_seconds),
                guess_seconds: parse_positive("GUESS_SECONDS", defaults.game.guess_seconds),
                points_per_guess: parse_var("POINTS_PER_GUESS", defaults.game.points_per_guess),
            },
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// CORS 허용 출처가 와일드카드인지 여부
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

// 0초 타이머는 즉시 만료되므로 기본값으로 대체
fn parse_positive(key: &str, default: u32) -> u32 {
    match parse_var(key, default) {
        0 => default,
        v => v,
    }
}
