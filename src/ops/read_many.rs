use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::{Context, io};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadManyRequest {
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadManyResponse {
    pub content: String,
}

/// Reads every requested file, isolating per-file failures.
///
/// A denied or unreadable path renders as an inline error section instead of
/// failing the batch; one bad path never poisons the rest.
pub fn read_many_files(ctx: &Context, request: ReadManyRequest) -> Result<ReadManyResponse> {
    let mut sections = Vec::with_capacity(request.paths.len());
    for requested in &request.paths {
        let section = match read_one(ctx, requested) {
            Ok(content) => format!("{requested}:\n{content}\n"),
            Err(err) => format!("{requested}: Error - {err}"),
        };
        sections.push(section);
    }
    Ok(ReadManyResponse {
        content: sections.join("\n---\n"),
    })
}

fn read_one(ctx: &Context, requested: &str) -> Result<String> {
    let path = ctx.validate_path(requested)?;
    io::read_full(&path)
}
