use is_terminal::IsTerminal;

/// Check if stderr is connected to a TTY
pub fn is_stderr_tty() -> bool {
    std::io::stderr().is_terminal()
}

/// Decide whether stderr messages get emoji prefixes
pub fn should_use_emoji_for_stderr(no_emoji: bool) -> bool {
    if no_emoji || !is_stderr_tty() {
        return false;
    }

    // Respect NO_EMOJI like NO_COLOR (https://no-color.org/)
    std::env::var("NO_EMOJI").is_err()
}
