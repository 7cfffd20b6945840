pub mod clean_command;
