use clap::{Arg, Command};
use negarg_parser::{neg_string, NegativeCommand};

#[test]
fn test_wrapper_accessors() {
    let wrapper = NegativeCommand::from(Command::new("tool").arg(Arg::new("x")));
    assert_eq!(wrapper.inner().get_name(), "tool");
    assert_eq!(wrapper.into_inner().get_name(), "tool");
}

#[test]
fn test_inner_mut() {
    let mut wrapper = NegativeCommand::new(Command::new("tool"));
    wrapper.inner_mut().set_bin_name("renamed");
    assert_eq!(wrapper.inner().get_bin_name(), Some("renamed"));
}

#[test]
fn test_clone_parses_independently() -> Result<(), clap::Error> {
    let wrapper = NegativeCommand::new(
        Command::new("tool").arg(Arg::new("x").value_parser(neg_string)),
    );
    let first = wrapper.clone().try_get_matches_from(["tool", "-1"])?;
    let second = wrapper.try_get_matches_from(["tool", "-2"])?;
    assert_eq!(first.get_one::<String>("x").map(String::as_str), Some("-1"));
    assert_eq!(second.get_one::<String>("x").map(String::as_str), Some("-2"));
    Ok(())
}
