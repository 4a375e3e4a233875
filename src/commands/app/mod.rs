pub mod settings_cmds;
