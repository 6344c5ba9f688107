use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use regex::Regex;

use crate::{filter::form::FilterControl, map::geo::LatLng};

pub const HELP: &str = "These commands are supported:
  help                              Show this help
  list                              List the markers currently on the map
  filter <control>=<value>          Change a filter control (type, price, rooms, guests, features)
  feature <name>                    Toggle a feature checkbox
  reset-filters                     Put every filter back to 'any'
  drag <lat>, <lng>                 Drag the main marker
  reset                             Put the main marker back and close popups
  popup <n>                         Open the popup of marker n
  close-popup                       Close the open popup
  address                           Show the address field
  alerts                            Show the visible error banners
  state                             Show the page state
  submit title=\"..\" price=N [type=flat rooms=N capacity=N timein=12:00 timeout=12:00 features=a,b description=\"..\"]
                                    Post a new ad at the main marker's address
  quit                              Leave";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitArgs {
    pub title: String,
    pub price: Option<u64>,
    pub housing_type: Option<String>,
    pub rooms: Option<u32>,
    pub capacity: Option<u32>,
    pub timein: Option<String>,
    pub timeout: Option<String>,
    pub features: Vec<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    List,
    Filter(FilterControl, String),
    Feature(String),
    ResetFilters,
    Drag(LatLng),
    Reset,
    Popup(usize),
    ClosePopup,
    Address,
    Alerts,
    State,
    Submit(SubmitArgs),
    Quit,
}

pub fn parse_command(input: &str) -> Result<Command> {
    let input = input.trim();
    let (name, rest) = match input.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (input, ""),
    };

    match name.to_lowercase().as_str() {
        "help" | "?" => Ok(Command::Help),
        "list" | "ls" => Ok(Command::List),
        "filter" => parse_filter(rest),
        "feature" => {
            if rest.is_empty() {
                return Err(anyhow!("Give the feature to toggle, e.g. 'feature wifi'"));
            }
            Ok(Command::Feature(rest.to_string()))
        }
        "reset-filters" => Ok(Command::ResetFilters),
        "drag" => Ok(Command::Drag(rest.parse()?)),
        "reset" => Ok(Command::Reset),
        "popup" => rest
            .parse::<usize>()
            .map(Command::Popup)
            .map_err(|_| anyhow!("Unable to parse the marker number '{}'", rest)),
        "close-popup" => Ok(Command::ClosePopup),
        "address" => Ok(Command::Address),
        "alerts" => Ok(Command::Alerts),
        "state" => Ok(Command::State),
        "submit" => parse_submit(rest).map(Command::Submit),
        "quit" | "exit" => Ok(Command::Quit),
        "" => Err(anyhow!("Empty command")),
        other => Err(anyhow!("Unknown command '{}', try 'help'", other)),
    }
}

fn parse_filter(input: &str) -> Result<Command> {
    lazy_static! {
        static ref FILTER_REGEX: Regex = Regex::new(r"^([\w-]+)\s*=\s*(.*)$").unwrap();
    }

    let caps = FILTER_REGEX
        .captures(input)
        .ok_or_else(|| anyhow!("Expected '<control>=<value>', got '{}'", input))?;

    let control: FilterControl = caps[1].parse()?;
    Ok(Command::Filter(control, caps[2].trim().to_string()))
}

// Values are either a bare word or a double quoted string.
fn field(regex: &Regex, input: &str) -> Option<String> {
    regex.captures(input).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    })
}

fn number(regex: &Regex, name: &str, input: &str) -> Result<Option<u64>> {
    match regex.captures(input).and_then(|caps| caps.get(1)) {
        Some(m) => m
            .as_str()
            .parse()
            .map(Some)
            .map_err(|_| anyhow!("The {} '{}' is out of range", name, m.as_str())),
        None => Ok(None),
    }
}

fn count(regex: &Regex, name: &str, input: &str) -> Result<Option<u32>> {
    number(regex, name, input)?
        .map(|n| u32::try_from(n).map_err(|_| anyhow!("The {} '{}' is out of range", name, n)))
        .transpose()
}

fn parse_submit(input: &str) -> Result<SubmitArgs> {
    lazy_static! {
        static ref TITLE_REGEX: Regex = Regex::new(r#"\btitle="([^"]*)"|\btitle=(\S+)"#).unwrap();
        static ref DESCRIPTION_REGEX: Regex =
            Regex::new(r#"\bdescription="([^"]*)"|\bdescription=(\S+)"#).unwrap();
        static ref PRICE_REGEX: Regex = Regex::new(r"\bprice=(\d+)\b").unwrap();
        static ref TYPE_REGEX: Regex = Regex::new(r"\btype=(\w+)\b").unwrap();
        static ref ROOMS_REGEX: Regex = Regex::new(r"\brooms=(\d+)\b").unwrap();
        static ref CAPACITY_REGEX: Regex = Regex::new(r"\bcapacity=(\d+)\b").unwrap();
        static ref TIMEIN_REGEX: Regex = Regex::new(r"\btimein=(\d{2}:\d{2})\b").unwrap();
        static ref TIMEOUT_REGEX: Regex = Regex::new(r"\btimeout=(\d{2}:\d{2})\b").unwrap();
        static ref FEATURES_REGEX: Regex = Regex::new(r"\bfeatures=([\w,]+)").unwrap();
    }

    let title = field(&TITLE_REGEX, input).ok_or_else(|| anyhow!("No title given"))?;

    let features = FEATURES_REGEX
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| {
            m.as_str()
                .split(',')
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(SubmitArgs {
        title,
        price: number(&PRICE_REGEX, "price", input)?,
        housing_type: field(&TYPE_REGEX, input),
        rooms: count(&ROOMS_REGEX, "rooms", input)?,
        capacity: count(&CAPACITY_REGEX, "capacity", input)?,
        timein: field(&TIMEIN_REGEX, input),
        timeout: field(&TIMEOUT_REGEX, input),
        features,
        description: field(&DESCRIPTION_REGEX, input),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filter_command() {
        assert_eq!(
            parse_command("filter housing-price = high").unwrap(),
            Command::Filter(FilterControl::HousingPrice, "high".to_string())
        );
        assert!(parse_command("filter colour=red").is_err());
    }

    #[test]
    fn parses_drag_command() {
        assert_eq!(
            parse_command("drag 35.7, 139.8").unwrap(),
            Command::Drag(LatLng::new(35.7, 139.8))
        );
    }

    #[test]
    fn parses_submit_command() {
        let command =
            parse_command(r#"submit title="Домик у озера" price=12000 rooms=2 features=wifi,parking"#)
                .unwrap();
        let Command::Submit(args) = command else {
            panic!("expected submit");
        };
        assert_eq!(args.title, "Домик у озера");
        assert_eq!(args.price, Some(12000));
        assert_eq!(args.rooms, Some(2));
        assert_eq!(args.capacity, None);
        assert_eq!(args.features, vec!["wifi", "parking"]);
    }

    #[test]
    fn rejects_counts_that_do_not_fit() {
        assert!(parse_command("submit title=x rooms=4294967296").is_err());
        assert!(parse_command("submit title=x capacity=99999999999").is_err());
        assert!(parse_command("submit title=x price=99999999999999999999").is_err());

        let Command::Submit(args) = parse_command("submit title=x rooms=4294967295").unwrap() else {
            panic!("expected submit");
        };
        assert_eq!(args.rooms, Some(u32::MAX));
    }

    #[test]
    fn rejects_unknown_commands() {
        assert!(parse_command("fly me to the moon").is_err());
        assert!(parse_command("popup first").is_err());
    }
}
