//! Human-readable narrative output

use colored::Colorize;
use std::fmt::{self, Write};

use crate::collector::ApplicationSummary;

fn heading(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "{}", title.cyan())
}

fn section<'a, I>(out: &mut String, title: &str, items: I) -> fmt::Result
where
    I: IntoIterator<Item = &'a String>,
{
    heading(out, title)?;
    for item in items {
        writeln!(out, "\t{}", item)?;
    }
    Ok(())
}

fn write_report(out: &mut String, summary: &ApplicationSummary, verbose: bool) -> fmt::Result {
    let details = summary.details.as_ref().filter(|_| verbose);

    writeln!(out, "{} {}", "App:".cyan(), summary.app)?;
    if let Some(details) = details {
        writeln!(out, "{} {}", "Namespace:".cyan(), details.namespace)?;
    }

    section(out, "Pods:", &summary.pods)?;
    section(out, "Linked Services:", &summary.services)?;
    section(out, "Linked Ingress resources:", &summary.ingress)?;

    heading(out, "Mounted Storage:")?;
    for (kind, values) in summary.storage.kinds() {
        if values.is_empty() {
            continue;
        }
        writeln!(out, "\t{}s:", kind)?;
        for value in values {
            writeln!(out, "\t\t{}", value)?;
        }
    }

    section(out, "Linked Secrets:", &summary.secrets)?;
    section(out, "Linked ConfigMaps:", &summary.configs)?;
    section(out, "Running on Nodes:", &summary.nodes)?;

    if let Some(details) = details {
        section(out, "Pod Containers:", &details.containers)?;

        heading(out, "Labels:")?;
        for (key, value) in &details.labels {
            writeln!(out, "\t{} = {}", key, value)?;
        }

        heading(out, "Annotations:")?;
        for (key, value) in &details.annotations {
            writeln!(out, "\t{} = {}", key, value)?;
        }
    }

    Ok(())
}

pub fn render(summary: &ApplicationSummary, verbose: bool) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut out, summary, verbose);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::sample;

    fn headings(text: &str) -> Vec<String> {
        text.lines()
            .filter(|l| !l.starts_with('\t'))
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn test_section_order() {
        let text = render(&sample::summary(true), true);
        let order = [
            "App:",
            "Namespace:",
            "Pods:",
            "Linked Services:",
            "Linked Ingress resources:",
            "Mounted Storage:",
            "Linked Secrets:",
            "Linked ConfigMaps:",
            "Running on Nodes:",
            "Pod Containers:",
            "Labels:",
            "Annotations:",
        ];

        let lines = headings(&text);
        assert_eq!(lines.len(), order.len());
        for (line, title) in lines.iter().zip(order) {
            assert!(line.contains(title), "expected {} in {}", title, line);
        }
    }

    #[test]
    fn test_storage_subheaders_only_when_present() {
        let text = render(&sample::summary(false), false);
        assert!(text.contains("\tpvcs:\n\t\tckt-data\n"));
        assert!(!text.contains("hostPaths:"));
    }

    #[test]
    fn test_host_paths_listed_after_pvcs() {
        let mut summary = sample::summary(false);
        summary.storage.host_path.insert("/var/log".to_string());
        summary.storage.host_path.insert("/etc/ssl".to_string());

        let text = render(&summary, false);
        assert!(text.contains("\tpvcs:\n\t\tckt-data\n\thostPaths:\n\t\t/etc/ssl\n\t\t/var/log\n"));
    }

    #[test]
    fn test_verbose_key_value_lines() {
        let text = render(&sample::summary(true), true);
        assert!(text.contains("\tapp = checkout\n"));
        assert!(text.contains("\tteam = payments\n"));
        assert!(text.contains("\tenvoy\n"));
    }

    #[test]
    fn test_non_verbose_hides_details() {
        let text = render(&sample::summary(true), false);
        assert!(!text.contains("Namespace:"));
        assert!(!text.contains("Pod Containers:"));
        assert!(!text.contains("team = payments"));
        assert!(text.contains("\tworker-2\n"));
    }
}
