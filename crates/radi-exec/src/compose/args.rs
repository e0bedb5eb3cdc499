use radi_model::PropertySet;

use crate::{
    ExecError, ExecResult,
    compose::{ComposeAction, ids},
};

/// Build the `docker compose` argument vector for `action` from resolved properties.
///
/// Absent properties fall back to their compose defaults, so a bare set yields the bare command.
pub fn compose_args(action: ComposeAction, props: &PropertySet) -> ExecResult<Vec<String>> {
    let flag = |id: &str| props.bool(id).unwrap_or(false);
    let mut args = vec!["compose".to_string()];

    if let Some(dir) = props.string(ids::PROJECT_DIR).filter(|d| !d.is_empty()) {
        args.extend(["--project-directory".to_string(), dir.to_string()]);
    }
    for file in props.string_list(ids::COMPOSE_FILE).unwrap_or_default() {
        if !file.is_empty() {
            args.extend(["-f".to_string(), file.clone()]);
        }
    }

    match action {
        ComposeAction::Pull => args.push("pull".into()),
        ComposeAction::Up => {
            if flag(ids::NO_RECREATE) && flag(ids::FORCE_RECREATE) {
                return Err(ExecError::InvalidProperty {
                    id: ids::FORCE_RECREATE,
                    reason: format!("cannot be combined with {}", ids::NO_RECREATE),
                });
            }
            args.extend(["up".into(), "-d".into()]);
            if flag(ids::NO_RECREATE) {
                args.push("--no-recreate".into());
            }
            if flag(ids::FORCE_RECREATE) {
                args.push("--force-recreate".into());
            }
            if flag(ids::NO_BUILD) {
                args.push("--no-build".into());
            }
        }
        ComposeAction::Down => {
            args.push("down".into());
            if flag(ids::REMOVE_VOLUMES) {
                args.push("--volumes".into());
            }
            match props.string(ids::REMOVE_IMAGES).unwrap_or("") {
                "" => {}
                scope @ ("local" | "all") => args.extend(["--rmi".into(), scope.to_string()]),
                other => {
                    return Err(ExecError::InvalidProperty {
                        id: ids::REMOVE_IMAGES,
                        reason: format!("expected 'local' or 'all', got '{other}'"),
                    });
                }
            }
            if !flag(ids::NO_REMOVE_ORPHANS) {
                args.push("--remove-orphans".into());
            }
        }
        ComposeAction::Info => args.push("ps".into()),
    }
    Ok(args)
}
