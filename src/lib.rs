//! Workspace-level tooling package (pre-commit hooks). The delivery zone
//! crates live under `crates/`.
