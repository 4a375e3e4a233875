pub mod process_cmds;
