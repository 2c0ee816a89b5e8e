use anyhow::{Result, bail};
use std::io::{self, IsTerminal};
use zeroize::Zeroizing;

pub fn read_password() -> Result<Zeroizing<String>> {
    //  Environment Variable
    //  CRYPTKIT_PASSWORD="supersecret" cryptkit encrypt "hello"
    if let Ok(pw) = std::env::var("CRYPTKIT_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    //  stdin (Pipeline)
    //  printf "%s" "$PASSWORD" | cryptkit encrypt "hello"
    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_line(&mut buf)?;
        let pw = buf.trim_end().to_string();

        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    //  Interactive (TTY)
    if io::stdin().is_terminal() {
        let pw = rpassword::prompt_password("Password: ")?;
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    bail!("No password provided")
}
