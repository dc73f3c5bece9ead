/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Resolve(String),
    List,
    Clear,
    Remove(i64),
    /// `.remove` without exactly one integer argument.
    RemoveUsage,
    Exit,
    Blank,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        match line {
            "" => return SessionCommand::Blank,
            ".exit" => return SessionCommand::Exit,
            ".list" => return SessionCommand::List,
            ".clear" => return SessionCommand::Clear,
            _ => {}
        }

        if let Some(rest) = line.strip_prefix(".remove") {
            let mut args = rest.split_whitespace();
            return match (args.next(), args.next()) {
                (Some(n), None) if rest.starts_with(char::is_whitespace) => n
                    .parse()
                    .map(SessionCommand::Remove)
                    .unwrap_or(SessionCommand::RemoveUsage),
                _ => SessionCommand::RemoveUsage,
            };
        }

        SessionCommand::Resolve(line.to_string())
    }
}
