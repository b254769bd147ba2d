use std::io::{BufRead, Write};

use steamhours_core::domain::accounts::{parse_choice, pick_account};
use steamhours_core::models::SteamAccount;
use steamhours_core::{Error, Result};

use crate::style::Palette;

const RULE: &str = "──────────────────────────────────────────────────";

/// Pick the account to analyze, asking on `input` when it cannot be
/// decided from `index` alone. `Ok(None)` means the input was closed.
pub fn choose_account<'a, R, W>(
    accounts: &'a [SteamAccount],
    index: Option<usize>,
    input: &mut R,
    out: &mut W,
    palette: Palette,
) -> Result<Option<&'a SteamAccount>>
where
    R: BufRead,
    W: Write,
{
    if let Some(account) = pick_account(accounts, index)? {
        writeln!(out, "Using Steam account: {account}")?;
        return Ok(Some(account));
    }

    writeln!(out)?;
    writeln!(out, "{}", palette.heading("Steam Account Selection"))?;
    writeln!(out, "{}", palette.dim(RULE))?;
    writeln!(out, "Found {} Steam account(s):", accounts.len())?;
    writeln!(out)?;
    for (i, account) in accounts.iter().enumerate() {
        let marker = if account.most_recent { '*' } else { ' ' };
        writeln!(out, " {marker}[{}] {account}", i + 1)?;
    }
    writeln!(out)?;
    writeln!(out, "Press ENTER to select the most recent account")?;
    writeln!(out, "Or enter a number (1-{}) to choose a specific account", accounts.len())?;
    writeln!(out, "{}", palette.dim(RULE))?;

    loop {
        write!(out, "Select account: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(None);
        }

        match parse_choice(&line, accounts) {
            Ok(account) => {
                writeln!(out, "Selected: {account}")?;
                return Ok(Some(account));
            }
            Err(Error::InvalidInput(message)) => writeln!(out, "{}", palette.warning(&message))?,
            Err(e) => return Err(e),
        }
    }
}

/// Ask for a Steam Web API key on the terminal. `Ok(None)` means the input
/// was closed.
pub fn read_api_key<R, W>(
    input: &mut R,
    out: &mut W,
    palette: Palette,
) -> Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", palette.heading("Steam Web API Key Required"))?;
    writeln!(out, "{}", palette.dim(RULE))?;
    writeln!(out, "To use this tool, you need a Steam Web API key:")?;
    writeln!(out, "  1. Go to https://steamcommunity.com/dev/apikey")?;
    writeln!(out, "  2. Log in with your Steam account")?;
    writeln!(out, "  3. Enter any domain name (e.g. 'localhost')")?;
    writeln!(out, "  4. Copy the generated key")?;
    writeln!(out, "The key will be stored for future runs.")?;
    writeln!(out, "{}", palette.dim(RULE))?;
    write!(out, "Enter your Steam Web API key: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::DateTime;

    use super::*;

    fn accounts() -> Vec<SteamAccount> {
        ["Alpha", "Bravo", "Charlie"]
            .iter()
            .enumerate()
            .map(|(i, name)| SteamAccount {
                steam_id: format!("7656119800000000{i}"),
                account_name: name.to_lowercase(),
                persona_name: name.to_string(),
                most_recent: i == 1,
                timestamp: DateTime::from_timestamp(1_700_000_000 - i as i64, 0).unwrap(),
            })
            .collect()
    }

    fn run(input: &str, index: Option<usize>) -> (Option<String>, String) {
        let accounts = accounts();
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();

        let chosen = choose_account(&accounts, index, &mut input, &mut out, Palette::plain())
            .unwrap()
            .map(|a| a.persona_name.clone());

        (chosen, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_enter_picks_most_recent() {
        let (chosen, out) = run("\n", None);

        assert_eq!(chosen.as_deref(), Some("Bravo"));
        assert!(out.contains(" *[2] Bravo (bravo) (Most Recent)"));
        assert!(out.contains("Or enter a number (1-3)"));
    }

    #[test]
    fn test_reprompts_on_invalid_input() {
        let (chosen, out) = run("x\n9\n3\n", None);

        assert_eq!(chosen.as_deref(), Some("Charlie"));
        assert!(out.contains("Please enter a number or press ENTER"));
        assert!(out.contains("Invalid account index 9. Valid range: 1-3"));
        assert_eq!(out.matches("Select account: ").count(), 3);
    }

    #[test]
    fn test_closed_input_cancels() {
        let (chosen, _) = run("", None);

        assert_eq!(chosen, None);
    }

    #[test]
    fn test_index_skips_prompt() {
        let (chosen, out) = run("", Some(1));

        assert_eq!(chosen.as_deref(), Some("Alpha"));
        assert!(!out.contains("Select account"));
    }

    #[test]
    fn test_read_api_key() {
        let mut input = Cursor::new(b"  ABCDEF0123  \n".to_vec());
        let mut out = Vec::new();

        let key = read_api_key(&mut input, &mut out, Palette::plain()).unwrap();

        assert_eq!(key.as_deref(), Some("ABCDEF0123"));
        assert!(String::from_utf8(out).unwrap().contains("steamcommunity.com/dev/apikey"));
    }

    #[test]
    fn test_read_api_key_closed_input() {
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();

        assert_eq!(read_api_key(&mut input, &mut out, Palette::plain()).unwrap(), None);

        // an empty line is an answer, not a cancel
        let mut input = Cursor::new(b"\n".to_vec());
        let key = read_api_key(&mut input, &mut out, Palette::plain()).unwrap();
        assert_eq!(key.as_deref(), Some(""));
    }
}
