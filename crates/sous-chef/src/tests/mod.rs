mod command_speaker;
mod secrets;
