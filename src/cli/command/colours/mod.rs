pub mod colours_command;
