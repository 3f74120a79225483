use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::vm_manager::VMManager;

/// Read a batch file of whitespace-separated `segment offset` pairs
pub fn read_accesses<P: AsRef<Path>>(path: P) -> Result<Vec<(usize, usize)>, String> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| format!("Failed to read input file: {}", e))?;
    parse_accesses(&content)
}

pub fn parse_accesses(content: &str) -> Result<Vec<(usize, usize)>, String> {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    if tokens.len() % 2 != 0 {
        return Err(format!(
            "Input has {} tokens, expected segment/offset pairs",
            tokens.len()
        ));
    }

    let mut accesses = Vec::with_capacity(tokens.len() / 2);
    for pair in tokens.chunks(2) {
        let segment: usize = pair[0]
            .parse()
            .map_err(|_| format!("Invalid segment index: {}", pair[0]))?;
        let offset: usize = pair[1]
            .parse()
            .map_err(|_| format!("Invalid offset: {}", pair[1]))?;
        accesses.push((segment, offset));
    }
    Ok(accesses)
}

pub fn format_results(results: &[i64]) -> String {
    let output: Vec<String> = results.iter().map(|r| r.to_string()).collect();
    output.join(" ")
}

pub fn write_results<P: AsRef<Path>>(path: P, results: &[i64]) -> Result<(), String> {
    fs::write(path.as_ref(), format_results(results))
        .map_err(|e| format!("Failed to write output file: {}", e))
}

// =========================================================================
// Table rendering for the interactive shell
// =========================================================================

pub fn render_segments(vmm: &VMManager) -> String {
    let mut out = String::from("\nSegments:\n");
    for (i, segment) in vmm.list_segments() {
        let _ = writeln!(out, "{}: {}", i, segment);
    }
    out
}

pub fn render_page_table(vmm: &VMManager) -> String {
    let mut out = String::from("\nPage Table (Page -> Frame):\n");
    for mapping in vmm.list_page_table() {
        let _ = match mapping.frame {
            Some(frame) => writeln!(out, "Page {} -> Frame {}", mapping.page, frame),
            None => writeln!(out, "Page {} -> Not in memory", mapping.page),
        };
    }
    out
}

pub fn render_frames(vmm: &VMManager) -> String {
    let mut out = String::from("\nFrames (Frame -> Page):\n");
    for slot in vmm.list_frames() {
        let _ = match slot.page {
            Some(page) => writeln!(out, "Frame {} -> Page {}", slot.frame, page),
            None => writeln!(out, "Frame {} -> Empty", slot.frame),
        };
    }
    out
}

pub fn render_stats(vmm: &VMManager) -> String {
    format!("\nStatistics:\n{}\n", vmm.stats())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replacement::PolicyKind;

    #[test]
    fn test_parse_accesses() {
        let accesses = parse_accesses("0 0\n1 10   2 340\n").unwrap();
        assert_eq!(accesses, vec![(0, 0), (1, 10), (2, 340)]);
        assert!(parse_accesses("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_accesses_errors() {
        assert!(parse_accesses("0 1 2").unwrap_err().contains("3 tokens"));
        assert!(parse_accesses("x 1").unwrap_err().contains("segment index: x"));
        assert!(parse_accesses("0 -4").unwrap_err().contains("offset: -4"));
    }

    #[test]
    fn test_format_results() {
        assert_eq!(format_results(&[0, 85, -1]), "0 85 -1");
        assert_eq!(format_results(&[]), "");
    }

    #[test]
    fn test_write_and_read_files() {
        let dir = std::env::temp_dir();
        let input = dir.join(format!("vm_manager_io_in_{}.txt", std::process::id()));
        let output = dir.join(format!("vm_manager_io_out_{}.txt", std::process::id()));

        fs::write(&input, "0 0 1 5").unwrap();
        assert_eq!(read_accesses(&input).unwrap(), vec![(0, 0), (1, 5)]);

        write_results(&output, &[0, -1]).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "0 -1");

        let _ = fs::remove_file(&input);
        let _ = fs::remove_file(&output);
        assert!(read_accesses(&input).unwrap_err().starts_with("Failed to read"));
    }

    #[test]
    fn test_render_tables() {
        let mut vmm = VMManager::new(256, 64, &["code", "data"], PolicyKind::Fifo).unwrap();
        vmm.access(1, 0).unwrap(); // LA 128 -> page 2 -> frame 0

        let segments = render_segments(&vmm);
        assert!(segments.contains("0: code: Base = 0, Limit = 128"));
        assert!(segments.contains("1: data: Base = 128, Limit = 128"));

        let pages = render_page_table(&vmm);
        assert!(pages.contains("Page 2 -> Frame 0"));
        assert!(pages.contains("Page 0 -> Not in memory"));

        let frames = render_frames(&vmm);
        assert!(frames.contains("Frame 0 -> Page 2"));
        assert!(frames.contains("Frame 3 -> Empty"));

        let stats = render_stats(&vmm);
        assert!(stats.contains("Total accesses: 1"));
        assert!(stats.contains("Page fault rate: 100.00%"));
    }
}
