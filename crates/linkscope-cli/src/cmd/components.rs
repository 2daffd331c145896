//! `linkscope components`.

use std::io::{self, Write};

use clap::Args;

use super::{Context, SnapshotArg};
use crate::output::{pretty_section, render_mode};

/// Arguments for `linkscope components`.
#[derive(Args, Debug, Clone)]
pub struct ComponentsArgs {
    #[command(flatten)]
    pub input: SnapshotArg,
}

/// Execute `linkscope components`.
pub fn run_components(args: &ComponentsArgs, ctx: &Context) -> anyhow::Result<()> {
    let snapshot = ctx.load(&args.input)?;
    let components = ctx.analyzer.components(&snapshot.nodes, &snapshot.edges);
    render_mode(
        ctx.output,
        components.as_slice(),
        render_components_text,
        render_components_pretty,
    )
}

fn render_components_text(components: &[Vec<String>], w: &mut dyn Write) -> io::Result<()> {
    for members in components {
        writeln!(w, "{}\t{}", members.len(), members.join(","))?;
    }
    Ok(())
}

fn render_components_pretty(components: &[Vec<String>], w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Components ({})", components.len()))?;
    for (i, members) in components.iter().enumerate() {
        writeln!(w, "  {:>3}. [{}] {}", i + 1, members.len(), members.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rows_lead_with_size() {
        let components = vec![
            vec!["A".to_string(), "B".to_string()],
            vec!["C".to_string()],
        ];
        let mut out = Vec::new();
        render_components_text(&components, &mut out).expect("render");
        assert_eq!(String::from_utf8(out).expect("utf8"), "2\tA,B\n1\tC\n");
    }
}
