use std::fmt::Formatter;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub rom_file_path: String,
    /// Print the CPU trace line before every instruction.
    pub trace_enabled: bool,
    /// Stop after this many clock cycles; run forever if not set.
    pub max_cycles: Option<u64>,
}

impl std::fmt::Display for RunConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "rom_file_path: {}", self.rom_file_path)?;
        writeln!(f, "trace_enabled: {}", self.trace_enabled)?;
        writeln!(f, "max_cycles: {}", fmt_option(self.max_cycles.as_ref()))?;

        Ok(())
    }
}

fn fmt_option<T: std::fmt::Display>(option: Option<&T>) -> String {
    match option {
        Some(value) => format!("{value}"),
        None => "<None>".into(),
    }
}
