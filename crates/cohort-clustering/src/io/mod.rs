//! IO utilities for loading and exporting rosters.

pub mod roster;

pub use roster::{
    read_roster_csv, read_roster_csv_with_config, write_roster_csv, RosterReaderConfig,
};
