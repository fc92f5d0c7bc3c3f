use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use tomatillo_core::grid::YearLayout;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Location of the SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Colour the report grids
    #[serde(default = "default_color")]
    pub color: bool,
    /// Days window for `list` when `--days` is not given (0 lists everything)
    #[serde(default)]
    pub default_list_days: u32,
    #[serde(default)]
    pub year_layout: YearLayout,
}

fn default_database_path() -> String {
    "tomatillo.db".to_string()
}

fn default_color() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            color: default_color(),
            default_list_days: 0,
            year_layout: YearLayout::default(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file("tomatillo.toml"))
                .merge(Env::prefixed("TOMATILLO_")),
        )
    }

    fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }
}
