// src/core/rc_resolver.rs

//! Recursive resolution of rc files into a provenance-tagged option map.
//!
//! Each file is parsed line by line. An `import` line splices the imported
//! file's options in immediately, before the importer's remaining lines,
//! so option order is file-then-line-then-token order across the whole
//! import tree. A file may be reached from independent branches, but a
//! file importing anything in its own ancestry is a hard error.

use crate::core::tokenizer;
use crate::core::workspace;
use crate::models::{ClientError, ClientResult, OptionsBySource, RcFile, RcOption};
use std::fs;
use std::io::{self, Write};

/// Registers `filename` as the next top-level rc source and parses it,
/// expanding imports, into `rcfiles` and `rcoptions`.
///
/// The caller is expected to have verified readability; a read failure
/// here is reported as an internal error. Startup options found along the
/// way are reported on stderr, one line per contributing file.
pub fn parse_rc_file(
    workspace: &str,
    filename: &str,
    rcfiles: &mut Vec<RcFile>,
    rcoptions: &mut OptionsBySource,
) -> ClientResult<()> {
    parse_with_trace(workspace, filename, rcfiles, rcoptions, &mut io::stderr().lock())
}

/// Same as [`parse_rc_file`], with the startup trace sent to `trace`
/// instead of stderr.
fn parse_with_trace<W: Write>(
    workspace: &str,
    filename: &str,
    rcfiles: &mut Vec<RcFile>,
    rcoptions: &mut OptionsBySource,
    trace: &mut W,
) -> ClientResult<()> {
    let index = rcfiles.len();
    rcfiles.push(RcFile::new(filename, index));
    let mut import_stack = vec![filename.to_string()];
    parse_recursive(
        workspace,
        filename,
        index,
        rcfiles,
        rcoptions,
        &mut import_stack,
        trace,
    )
}

fn parse_recursive<W: Write>(
    workspace: &str,
    filename: &str,
    index: usize,
    rcfiles: &mut Vec<RcFile>,
    rcoptions: &mut OptionsBySource,
    import_stack: &mut Vec<String>,
    trace: &mut W,
) -> ClientResult<()> {
    log::debug!("Reading rc file '{filename}' as source {index}");

    let contents = fs::read_to_string(filename).map_err(|_| ClientError::RcReadFailed {
        path: filename.to_string(),
    })?;

    // A '\' at the end of a line continues the line.
    let contents = tokenizer::strip_line_continuations(&contents);

    let mut startup_tokens: Vec<String> = Vec::new();

    for raw_line in contents.split('\n') {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let words = tokenizer::tokenize(line, '#');
        let Some((command, rest)) = words.split_first() else {
            // The line held only a comment.
            continue;
        };

        if command == "import" {
            let import_path = match rest {
                [path] => workspace::rewrite_workspace_path(workspace, path),
                _ => None,
            };
            let Some(import_path) = import_path else {
                return Err(ClientError::InvalidImport {
                    path: filename.to_string(),
                    line: line.to_string(),
                });
            };

            if import_stack.iter().any(|ancestor| *ancestor == import_path) {
                let chain: String = import_stack
                    .iter()
                    .map(|ancestor| format!("  {ancestor}\n"))
                    .collect();
                return Err(ClientError::ImportCycle { chain });
            }

            let import_index = rcfiles.len();
            rcfiles.push(RcFile::new(&import_path, import_index));
            import_stack.push(import_path.clone());
            let imported = parse_recursive(
                workspace,
                &import_path,
                import_index,
                rcfiles,
                rcoptions,
                import_stack,
                trace,
            );
            import_stack.pop();
            imported?;
        } else {
            let entry = rcoptions.entry(command.clone()).or_default();
            for word in rest {
                entry.push(RcOption::new(index, word));
            }
            if command == "startup" {
                startup_tokens.extend(rest.iter().cloned());
            }
        }
    }

    if !startup_tokens.is_empty() {
        // A trace write failure must not fail the parse.
        let _ = writeln!(
            trace,
            "INFO: Reading 'startup' options from {}: {}",
            filename,
            startup_tokens.join(" ")
        );
    }
    Ok(())
}
