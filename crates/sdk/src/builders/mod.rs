/// Season Program.
pub mod season_program;

pub use self::season_program::SeasonProgram;
