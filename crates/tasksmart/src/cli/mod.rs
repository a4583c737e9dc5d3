/*
[INPUT]:  Parsed CLI subcommands
[OUTPUT]: Non-interactive and wizard command implementations
[POS]:    CLI layer root
[UPDATE]: When adding subcommands
*/

pub mod init;
pub mod summary;
