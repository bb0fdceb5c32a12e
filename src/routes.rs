mod contact;
mod health_check;

pub use contact::*;
pub use health_check::*;

/// Writes the full source chain of an error, one cause per line, so operators
/// see the underlying transport failure even though the client only receives
/// a generic message.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
