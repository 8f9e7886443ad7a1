use anyhow::{anyhow, Context, Result};
use std::collections::{BTreeMap, HashSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const PROJECT_FILE_NAME: &str = ".strainerrc";
const MAX_ALIAS_DEPTH: usize = 10;

/// Settings read from `.strainerrc` / `config.ini`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigFile {
    /// Arguments prepended to every invocation
    pub defaults: Option<String>,
    /// Input path used when none is given on the command line
    pub file: Option<String>,
    pub aliases: BTreeMap<String, String>,
}

impl ConfigFile {
    /// Find project-level .strainerrc by walking up from the working directory
    pub fn find_project_config() -> Option<PathBuf> {
        let mut current = env::current_dir().ok()?;
        loop {
            let candidate = current.join(PROJECT_FILE_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// User config file locations, most preferred first
    pub fn user_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if cfg!(windows) {
            if let Ok(appdata) = env::var("APPDATA") {
                paths.push(PathBuf::from(appdata).join("strainer").join("config.ini"));
            }
            if let Ok(userprofile) = env::var("USERPROFILE") {
                paths.push(PathBuf::from(userprofile).join(PROJECT_FILE_NAME));
            }
        } else {
            let xdg_config = env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    env::var("HOME")
                        .map(|h| PathBuf::from(h).join(".config"))
                        .unwrap_or_else(|_| PathBuf::from(".config"))
                });
            paths.push(xdg_config.join("strainer").join("config.ini"));

            if let Ok(home) = env::var("HOME") {
                paths.push(PathBuf::from(home).join(PROJECT_FILE_NAME));
            }
        }

        paths
    }

    /// Load configuration with precedence project > user > built-in defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Only the first existing user file counts
        if let Some(user_path) = Self::user_config_paths().into_iter().find(|p| p.is_file()) {
            config = config.merge(Self::load_from_path(&user_path)?);
        }

        if let Some(project_path) = Self::find_project_config() {
            config = config.merge(Self::load_from_path(&project_path)?);
        }

        Ok(config)
    }

    /// Load an explicit `--config-file`, or fall back to the search order
    pub fn load_with_custom_path(custom_path: Option<&str>) -> Result<Self> {
        match custom_path {
            Some(path) => Self::load_from_path(Path::new(path)),
            None => Self::load(),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse_ini_content(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse INI content. Unknown keys and sections are ignored.
    pub fn parse_ini_content(content: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut section = String::new();

        for (lineno, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = name.trim().to_string();
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| anyhow!("line {}: expected key = value", lineno + 1))?;
            let (key, value) = (key.trim(), value.trim());

            match (section.as_str(), key) {
                ("", "defaults") => config.defaults = Some(value.to_string()),
                ("", "file") => config.file = Some(value.to_string()),
                ("aliases", _) => {
                    config.aliases.insert(key.to_string(), value.to_string());
                }
                _ => {}
            }
        }

        Ok(config)
    }

    /// Overlay `other` on top of `self`; `other` wins on conflicts
    fn merge(self, other: Self) -> Self {
        let mut aliases = self.aliases;
        aliases.extend(other.aliases);
        Self {
            defaults: other.defaults.or(self.defaults),
            file: other.file.or(self.file),
            aliases,
        }
    }

    /// Expand an alias into arguments, following nested `-a` references
    pub fn resolve_alias(&self, name: &str) -> Result<Vec<String>> {
        self.resolve_alias_inner(name, &mut HashSet::new(), 0)
    }

    fn resolve_alias_inner(
        &self,
        name: &str,
        seen: &mut HashSet<String>,
        depth: usize,
    ) -> Result<Vec<String>> {
        if depth > MAX_ALIAS_DEPTH {
            return Err(anyhow!("Alias chain too deep: {} levels", depth));
        }
        if !seen.insert(name.to_string()) {
            return Err(anyhow!("Circular dependency detected in alias: {}", name));
        }

        let value = self
            .aliases
            .get(name)
            .ok_or_else(|| anyhow!("Unknown alias: {}", name))?;
        let args = shell_words::split(value)
            .with_context(|| format!("Invalid alias '{}': failed to parse arguments", name))?;

        let mut expanded = Vec::with_capacity(args.len());
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            if is_alias_flag(&arg) {
                if let Some(nested) = iter.next() {
                    expanded.extend(self.resolve_alias_inner(&nested, seen, depth + 1)?);
                    continue;
                }
            }
            expanded.push(arg);
        }

        seen.remove(name);
        Ok(expanded)
    }

    /// Prepend `defaults` after the program name and expand every alias
    pub fn process_args(&self, args: Vec<String>) -> Result<Vec<String>> {
        let mut with_defaults = Vec::with_capacity(args.len());
        let mut args = args.into_iter();
        with_defaults.extend(args.next());

        if let Some(defaults) = &self.defaults {
            let default_args = shell_words::split(defaults)
                .context("Invalid defaults: failed to parse arguments")?;
            with_defaults.extend(default_args);
        }
        with_defaults.extend(args);

        let mut expanded = Vec::with_capacity(with_defaults.len());
        let mut iter = with_defaults.into_iter();
        while let Some(arg) = iter.next() {
            if is_alias_flag(&arg) {
                if let Some(name) = iter.next() {
                    expanded.extend(self.resolve_alias(&name)?);
                    continue;
                }
            }
            expanded.push(arg);
        }

        Ok(expanded)
    }

    /// Print configuration sources, active values and search locations
    pub fn show_config() {
        println!("Configuration precedence: CLI > project {} > user config > defaults\n", PROJECT_FILE_NAME);

        let project_path = Self::find_project_config();
        let user_paths = Self::user_config_paths();
        let user_path = user_paths.iter().find(|p| p.is_file());

        match Self::load() {
            Ok(config) => {
                if project_path.is_none() && user_path.is_none() {
                    println!("No configuration files found. Using defaults.");
                } else {
                    println!("Configuration loaded from:");
                    if let Some(path) = &project_path {
                        println!("  Project: {}", path.display());
                    }
                    if let Some(path) = user_path {
                        println!("  User: {}", path.display());
                    }
                }

                if config.defaults.is_some() || config.file.is_some() {
                    println!("\nActive settings:");
                    if let Some(defaults) = &config.defaults {
                        println!("  defaults = {}", defaults);
                    }
                    if let Some(file) = &config.file {
                        println!("  file = {}", file);
                    }
                }

                if !config.aliases.is_empty() {
                    println!("\nActive aliases:");
                    for (name, value) in &config.aliases {
                        println!("  {} = {}", name, value);
                    }
                }
            }
            Err(e) => eprintln!("Error loading configuration: {:#}", e),
        }

        println!("\nConfiguration search locations (in precedence order):");
        match &project_path {
            Some(path) => println!("  1. Project: {} (found)", path.display()),
            None => println!(
                "  1. Project: {} (searched up directory tree, not found)",
                PROJECT_FILE_NAME
            ),
        }
        for (i, path) in user_paths.iter().enumerate() {
            let status = if path.is_file() { "(found)" } else { "(not found)" };
            println!("  {}. User: {} {}", i + 2, path.display(), status);
        }

        if project_path.is_none() && user_path.is_none() {
            println!("\nExample configuration file ({}):", PROJECT_FILE_NAME);
            println!();
            println!("# Arguments applied to every strainer command");
            println!("defaults = --chunk-size 500 --filter min-length");
            println!("file = input.txt");
            println!();
            println!("[aliases]");
            println!("strict = --filter contains-t,min-length,vowel-middle --min-length 4");
            println!("short-words = --filter min-length --min-length 2");
        }
    }
}

fn is_alias_flag(arg: &str) -> bool {
    arg == "-a" || arg == "--alias"
}
