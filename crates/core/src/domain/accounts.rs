//! Rules for ordering and choosing among the accounts found on this machine.

use std::cmp::Reverse;

use crate::error::{Error, Result};
use crate::models::SteamAccount;

/// Most recently used account first, then newest login first
pub fn sort_accounts(accounts: &mut [SteamAccount]) {
    accounts.sort_by_key(|account| (!account.most_recent, Reverse(account.timestamp)));
}

/// The account Steam marks as most recent, or the first one listed
pub fn most_recent(accounts: &[SteamAccount]) -> Option<&SteamAccount> {
    accounts
        .iter()
        .find(|account| account.most_recent)
        .or_else(|| accounts.first())
}

/// Resolve an account without asking the user.
///
/// `index` is 1-based. Returns `Ok(None)` when the choice has to be made
/// interactively.
pub fn pick_account(
    accounts: &[SteamAccount],
    index: Option<usize>,
) -> Result<Option<&SteamAccount>> {
    if accounts.is_empty() {
        return Err(Error::NotFound("No Steam accounts found".into()));
    }

    if accounts.len() == 1 {
        return Ok(accounts.first());
    }

    match index {
        Some(index) => by_index(accounts, index).map(Some),
        None => Ok(None),
    }
}

/// Interpret one line typed at the account prompt. An empty line picks the
/// most recent account.
pub fn parse_choice<'a>(input: &str, accounts: &'a [SteamAccount]) -> Result<&'a SteamAccount> {
    let input = input.trim();

    if input.is_empty() {
        return most_recent(accounts)
            .ok_or_else(|| Error::NotFound("No Steam accounts found".into()));
    }

    let index: usize = input
        .parse()
        .map_err(|_| Error::InvalidInput("Please enter a number or press ENTER".into()))?;

    by_index(accounts, index)
}

fn by_index(accounts: &[SteamAccount], index: usize) -> Result<&SteamAccount> {
    index
        .checked_sub(1)
        .and_then(|i| accounts.get(i))
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "Invalid account index {}. Valid range: 1-{}",
                index,
                accounts.len()
            ))
        })
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn account(id: &str, most_recent: bool, timestamp: i64) -> SteamAccount {
        SteamAccount {
            steam_id: id.to_string(),
            account_name: format!("acct_{id}"),
            persona_name: format!("Player {id}"),
            most_recent,
            timestamp: DateTime::from_timestamp(timestamp, 0).unwrap(),
        }
    }

    fn ids(accounts: &[SteamAccount]) -> Vec<&str> {
        accounts.iter().map(|a| a.steam_id.as_str()).collect()
    }

    #[test]
    fn test_sort_most_recent_then_newest() {
        let mut accounts = vec![
            account("old", false, 100),
            account("newer", false, 300),
            account("flagged", true, 50),
            account("middle", false, 200),
        ];

        sort_accounts(&mut accounts);

        assert_eq!(ids(&accounts), ["flagged", "newer", "middle", "old"]);
    }

    #[test]
    fn test_most_recent_falls_back_to_first() {
        let accounts = vec![account("a", false, 1), account("b", false, 2)];
        assert_eq!(most_recent(&accounts).unwrap().steam_id, "a");

        let accounts = vec![account("a", false, 1), account("b", true, 2)];
        assert_eq!(most_recent(&accounts).unwrap().steam_id, "b");

        assert!(most_recent(&[]).is_none());
    }

    #[test]
    fn test_pick_account() {
        assert!(pick_account(&[], None).unwrap_err().is_not_found());

        let single = vec![account("only", false, 1)];
        assert_eq!(pick_account(&single, Some(7)).unwrap().unwrap().steam_id, "only");

        let accounts = vec![account("a", true, 1), account("b", false, 2)];
        assert_eq!(pick_account(&accounts, Some(2)).unwrap().unwrap().steam_id, "b");
        assert!(pick_account(&accounts, None).unwrap().is_none());

        let err = pick_account(&accounts, Some(3)).unwrap_err();
        assert!(err.to_string().contains("Valid range: 1-2"));
        assert!(pick_account(&accounts, Some(0)).is_err());
    }

    #[test]
    fn test_parse_choice() {
        let accounts = vec![account("a", false, 1), account("b", true, 2)];

        assert_eq!(parse_choice("", &accounts).unwrap().steam_id, "b");
        assert_eq!(parse_choice("  \n", &accounts).unwrap().steam_id, "b");
        assert_eq!(parse_choice("1", &accounts).unwrap().steam_id, "a");
        assert_eq!(parse_choice(" 2 ", &accounts).unwrap().steam_id, "b");
        assert!(matches!(parse_choice("3", &accounts), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_choice("two", &accounts), Err(Error::InvalidInput(_))));
    }
}
