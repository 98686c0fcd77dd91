mod tests_commands;
mod tests_types;
