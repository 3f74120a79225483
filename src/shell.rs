//! Numbered interactive menu over any reader/writer pair.

use std::io::{self, BufRead, Write};

use log::debug;

use crate::io::{render_frames, render_page_table, render_segments, render_stats};
use crate::vm_manager::VMManager;

const MENU: &str = "\nVirtual Memory Manager Simulator\n\
1. Show Segments\n\
2. Show Page Table\n\
3. Show Frames\n\
4. Access Address\n\
5. Show Statistics\n\
0. Exit\n\
Enter choice: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    ShowSegments,
    ShowPageTable,
    ShowFrames,
    AccessAddress,
    ShowStats,
    Exit,
}

impl MenuOption {
    fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(MenuOption::ShowSegments),
            2 => Some(MenuOption::ShowPageTable),
            3 => Some(MenuOption::ShowFrames),
            4 => Some(MenuOption::AccessAddress),
            5 => Some(MenuOption::ShowStats),
            0 => Some(MenuOption::Exit),
            _ => None,
        }
    }
}

/// Next trimmed line, or `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Run the menu until the user picks Exit or input runs out
pub fn run_menu<R: BufRead, W: Write>(
    vmm: &mut VMManager,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    loop {
        write!(out, "{}", MENU)?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(());
        };
        let Ok(choice) = line.parse::<u32>() else {
            writeln!(out, "Invalid input!")?;
            continue;
        };
        debug!("menu choice {}", choice);

        match MenuOption::from_choice(choice) {
            Some(MenuOption::ShowSegments) => write!(out, "{}", render_segments(vmm))?,
            Some(MenuOption::ShowPageTable) => write!(out, "{}", render_page_table(vmm))?,
            Some(MenuOption::ShowFrames) => write!(out, "{}", render_frames(vmm))?,
            Some(MenuOption::AccessAddress) => {
                if !prompt_access(vmm, input, out)? {
                    return Ok(());
                }
            }
            Some(MenuOption::ShowStats) => write!(out, "{}", render_stats(vmm))?,
            Some(MenuOption::Exit) => {
                writeln!(out, "Exiting...")?;
                return Ok(());
            }
            None => writeln!(out, "Invalid choice!")?,
        }
    }
}

/// Ask for a segment and an offset, then perform the access.
/// Returns false when input ran out mid-prompt.
fn prompt_access<R: BufRead, W: Write>(
    vmm: &mut VMManager,
    input: &mut R,
    out: &mut W,
) -> io::Result<bool> {
    write!(out, "{}", render_segments(vmm))?;
    write!(
        out,
        "Enter segment index (0-{}): ",
        vmm.segments().len() - 1
    )?;
    out.flush()?;

    let Some(line) = read_line(input)? else {
        return Ok(false);
    };
    let segment = match line.parse::<usize>() {
        Ok(index) if index < vmm.segments().len() => index,
        _ => {
            writeln!(out, "Invalid segment index!")?;
            return Ok(true);
        }
    };

    let limit = vmm.segments().get(segment).map_or(0, |s| s.limit);
    write!(out, "Enter offset (0-{}): ", limit.saturating_sub(1))?;
    out.flush()?;

    let Some(line) = read_line(input)? else {
        return Ok(false);
    };
    let offset = match line.parse::<usize>() {
        Ok(offset) if offset < limit => offset,
        _ => {
            writeln!(out, "Invalid offset!")?;
            return Ok(true);
        }
    };

    match vmm.access(segment, offset) {
        Ok(translation) => writeln!(out, "{}", translation)?,
        Err(e) => writeln!(out, "Error: {}", e)?,
    }
    Ok(true)
}
