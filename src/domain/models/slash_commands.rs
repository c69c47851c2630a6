#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .trim()
            .split(' ')
            .filter(|e| return !e.is_empty())
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }
        let prefix = args[0].to_string();
        args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_help()
            || cmd.is_new_session()
            || cmd.is_history()
            || cmd.is_open_session()
            || cmd.is_attach_image()
            || cmd.is_clear_image()
            || cmd.is_voice()
            || cmd.is_listen()
            || cmd.is_export()
            || cmd.is_language()
            || cmd.is_scan()
            || cmd.is_logout()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Arguments joined back together, for paths with spaces.
    pub fn rest(&self) -> String {
        return self.args.join(" ");
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_new_session(&self) -> bool {
        return ["/n", "/new"].contains(&self.command.as_str());
    }

    pub fn is_history(&self) -> bool {
        return ["/hs", "/history"].contains(&self.command.as_str());
    }

    pub fn is_open_session(&self) -> bool {
        return ["/o", "/open"].contains(&self.command.as_str()) && !self.args.is_empty();
    }

    pub fn is_attach_image(&self) -> bool {
        return ["/i", "/image"].contains(&self.command.as_str()) && !self.args.is_empty();
    }

    pub fn is_clear_image(&self) -> bool {
        return ["/i", "/image"].contains(&self.command.as_str()) && self.args.is_empty();
    }

    pub fn is_voice(&self) -> bool {
        return ["/v", "/voice"].contains(&self.command.as_str());
    }

    pub fn is_listen(&self) -> bool {
        return ["/l", "/listen"].contains(&self.command.as_str());
    }

    pub fn is_export(&self) -> bool {
        return ["/x", "/export"].contains(&self.command.as_str());
    }

    pub fn is_language(&self) -> bool {
        return ["/lang", "/language"].contains(&self.command.as_str()) && self.args.len() == 1;
    }

    pub fn is_scan(&self) -> bool {
        return ["/s", "/scan"].contains(&self.command.as_str()) && !self.args.is_empty();
    }

    pub fn is_logout(&self) -> bool {
        return ["/logout"].contains(&self.command.as_str());
    }
}
