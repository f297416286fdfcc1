use std::process::Command;
use std::time::Duration;

use super::CompletionError;
use crate::process::capture::run_captured;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Produces full-line completions for a partial command line.
pub trait CompletionEngine: Send + Sync {
    fn complete(&self, line: &str) -> Result<Vec<String>, CompletionError>;
}

// The line arrives as $1 and is never interpolated into the script text.
// Each output line is the input line with its last word completed.
const COMPLETION_SCRIPT: &str = r#"
line="$1"
for f in /usr/share/bash-completion/bash_completion /etc/bash_completion \
         /opt/homebrew/etc/profile.d/bash_completion.sh \
         /usr/local/etc/profile.d/bash_completion.sh; do
  if [ -r "$f" ]; then . "$f" >/dev/null 2>&1; break; fi
done
read -r -a COMP_WORDS <<< "$line"
if [ ${#COMP_WORDS[@]} -eq 0 ] || [[ "$line" =~ [[:space:]]$ ]]; then
  COMP_WORDS+=("")
fi
COMP_LINE="$line"
COMP_POINT=${#line}
COMP_CWORD=$(( ${#COMP_WORDS[@]} - 1 ))
cur="${COMP_WORDS[COMP_CWORD]}"
head="${line%"$cur"}"
COMPREPLY=()
if [ "$COMP_CWORD" -eq 0 ]; then
  mapfile -t COMPREPLY < <(compgen -c -- "$cur" | sort -u)
else
  cmd="${COMP_WORDS[0]}"
  compspec=$(complete -p "$cmd" 2>/dev/null)
  if [ -z "$compspec" ]; then
    if declare -F _comp_load >/dev/null; then
      _comp_load "$cmd" >/dev/null 2>&1
    elif declare -F _completion_loader >/dev/null; then
      _completion_loader "$cmd" >/dev/null 2>&1
    fi
    compspec=$(complete -p "$cmd" 2>/dev/null)
  fi
  if [[ "$compspec" =~ -F[[:space:]]+([^[:space:]]+) ]]; then
    "${BASH_REMATCH[1]}" "$cmd" "$cur" "${COMP_WORDS[COMP_CWORD-1]}" >/dev/null 2>&1
  else
    mapfile -t COMPREPLY < <(compgen -f -- "$cur")
  fi
fi
for c in "${COMPREPLY[@]}"; do
  printf '%s%s\n' "$head" "$c"
done
"#;

/// Delegates to bash's programmable completion.
#[derive(Debug, Clone)]
pub struct BashCompletion {
    shell: String,
    timeout: Duration,
}

impl Default for BashCompletion {
    fn default() -> Self {
        Self::new()
    }
}

impl BashCompletion {
    pub fn new() -> Self {
        BashCompletion {
            shell: "bash".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl CompletionEngine for BashCompletion {
    fn complete(&self, line: &str) -> Result<Vec<String>, CompletionError> {
        let mut command = Command::new(&self.shell);
        command
            .args(["--noprofile", "--norc", "-c", COMPLETION_SCRIPT, "subsh-complete"])
            .arg(line);

        let captured = run_captured(&mut command, self.timeout)?;
        Ok(parse_candidates(&captured.stdout))
    }
}

fn parse_candidates(output: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    for candidate in output.lines().filter(|l| !l.trim().is_empty()) {
        if !candidates.iter().any(|seen| seen == candidate) {
            candidates.push(candidate.to_string());
        }
    }
    candidates
}
