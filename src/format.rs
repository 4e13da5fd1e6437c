use crate::catalog::Generator;
use prettytable::{self as ptable, cell, row};
use std::io::{self, Write};

pub trait HeaderFormat {
    fn format(&self, generator: &Generator) -> String;
}

#[derive(Default)]
pub struct DefaultHeaderFormat {}

impl DefaultHeaderFormat {
    pub fn new() -> Self {
        Default::default()
    }
}

impl HeaderFormat for DefaultHeaderFormat {
    fn format(&self, generator: &Generator) -> String {
        generator.name.to_string()
    }
}

pub struct Printer<H: HeaderFormat> {
    header_format: H,
}

impl<H: HeaderFormat> Printer<H> {
    pub fn new(header_format: H) -> Self {
        Self { header_format }
    }

    /// One row per generator: name, workload, how it ends.
    pub fn print_summary_lines<W: Write>(
        &self,
        out: &mut W,
        generators: &[Generator],
    ) -> io::Result<()> {
        let mut table = ptable::Table::new();
        table.set_format(*ptable::format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.add_row(row![c => "Generator", "Workload", "Lifecycle"]);
        for generator in generators {
            table.add_row(row![
                l->self.header_format.format(generator),
                l->generator.summary,
                l->generator.lifecycle
            ]);
        }
        table.print(out)?;
        Ok(())
    }

    /// Per-generator flag tables with defaults and environment fallbacks.
    pub fn print_full<W: Write>(&self, out: &mut W, generators: &[Generator]) -> io::Result<()> {
        for generator in generators {
            writeln!(out, "=== {} ===", self.header_format.format(generator))?;
            writeln!(out, "{} ({})", generator.summary, generator.lifecycle)?;
            let mut table = ptable::Table::new();
            table.set_format(*ptable::format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
            table.add_row(row![c => "Flag", "Default", "Env fallback", "Meaning"]);
            for flag in generator.flags {
                table.add_row(row![
                    l->flag.name,
                    l->flag.default,
                    l->flag.env.unwrap_or("-"),
                    l->flag.help
                ]);
            }
            table.print(out)?;
            writeln!(out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GENERATORS;

    #[test]
    fn summary_lists_every_generator() {
        let printer = Printer::new(DefaultHeaderFormat::new());
        let mut out = Vec::new();
        printer.print_summary_lines(&mut out, GENERATORS).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        for generator in GENERATORS {
            assert!(rendered.contains(generator.name), "{}", generator.name);
        }
    }

    #[test]
    fn full_output_carries_flags_and_defaults() {
        let printer = Printer::new(DefaultHeaderFormat::new());
        let mut out = Vec::new();
        printer.print_full(&mut out, GENERATORS).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("--sleep-ms"));
        assert!(rendered.contains("io_wait.dat"));
        assert!(rendered.contains("WL_ITERATIONS"));
        assert!(rendered.contains("(required)"));
    }
}
