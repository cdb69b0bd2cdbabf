pub mod roster;
pub mod run;
