use eyre::EyreHandler;
use itertools::Itertools;
use std::{error::Error, fmt};

/// Messages of `error` and all its sources.
///
/// Wrappers often repeat their source in their own message (`msg1: msg2` caused by `msg2`);
/// sources already contained in the previous message are skipped.
pub fn dedup_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes: Vec<String> = std::iter::successors(Some(error), |err| (*err).source())
        .map(|cause| cause.to_string().trim().to_string())
        .collect();
    causes.dedup_by(|b, a| a.contains(b.as_str()));
    causes
}

/// Error report handler printing the deduplicated chain of causes.
#[derive(Debug, Default)]
pub struct Handler;

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Display;
        dedup_chain(error).into_iter().format("; ").fmt(f)
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return fmt::Debug::fmt(error, f);
        }

        let errors = dedup_chain(error);
        let Some((error, sources)) = errors.split_first() else { return Ok(()) };
        write!(f, "{error}")?;

        if !sources.is_empty() {
            write!(f, "\n\nContext:")?;

            let multiple = sources.len() > 1;
            for (n, error) in sources.iter().enumerate() {
                writeln!(f)?;
                if multiple {
                    write!(f, "- Error #{n}: {error}")?;
                } else {
                    write!(f, "- {error}")?;
                }
            }
        }

        Ok(())
    }
}

/// Installs [`Handler`] as the global [`eyre`] hook.
pub fn install() {
    if let Err(e) = eyre::set_hook(Box::new(|_| Box::new(Handler))) {
        debug!("failed to install eyre error hook: {e}");
    }
}
