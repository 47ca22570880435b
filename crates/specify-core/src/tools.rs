/// True if `tool` resolves on PATH. Never errors.
pub fn exists(tool: &str) -> bool {
    which::which(tool).is_ok()
}
