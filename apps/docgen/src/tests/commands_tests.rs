use super::*;

#[test]
fn parses_requirement_text_verbatim() {
    assert_eq!(
        parse_command("analyze  Customers can reset a forgotten password ").expect("command"),
        WizardCommand::Analyze {
            requirement: "Customers can reset a forgotten password".to_string()
        }
    );
}

#[test]
fn empty_analyze_is_left_to_the_controller() {
    assert_eq!(
        parse_command("analyze").expect("command"),
        WizardCommand::Analyze {
            requirement: String::new()
        }
    );
}

#[test]
fn answers_by_position_or_element() {
    assert_eq!(
        parse_command("answer 2 = Customer").expect("command"),
        WizardCommand::Answer {
            target: AnswerTarget::Position(2),
            value: "Customer".to_string()
        }
    );
    assert_eq!(
        parse_command("answer Business Goal=Cut churn by 5%").expect("command"),
        WizardCommand::Answer {
            target: AnswerTarget::Element("Business Goal".to_string()),
            value: "Cut churn by 5%".to_string()
        }
    );
    assert!(parse_command("answer 0 = nope").is_err());
    assert!(parse_command("answer Actor").is_err());
}

#[test]
fn image_commands_use_one_based_positions() {
    assert_eq!(
        parse_command("caption functional-flow 1 Login sequence").expect("command"),
        WizardCommand::Caption {
            section: SectionId::from("functional-flow"),
            index: 0,
            caption: "Login sequence".to_string()
        }
    );
    assert_eq!(
        parse_command("remove-image risks 3").expect("command"),
        WizardCommand::RemoveImage {
            section: SectionId::from("risks"),
            index: 2
        }
    );
    assert!(parse_command("remove-image risks 0").is_err());
    assert_eq!(
        parse_command("image actor ./diagrams/actor map.png").expect("command"),
        WizardCommand::AttachImage {
            section: SectionId::from("actor"),
            path: PathBuf::from("./diagrams/actor map.png")
        }
    );
}

#[test]
fn export_accepts_known_formats_only() {
    assert_eq!(
        parse_command("export PDF").expect("command"),
        WizardCommand::Export {
            format: ExportFormat::Pdf
        }
    );
    assert_eq!(
        parse_command("export docx").expect("command"),
        WizardCommand::Export {
            format: ExportFormat::Word
        }
    );
    assert!(parse_command("export html").is_err());
}

#[test]
fn rejects_unknown_and_empty_commands() {
    assert!(parse_command("").is_err());
    let err = parse_command("publish now").expect_err("unknown");
    assert!(err.to_string().contains("publish"));
    assert_eq!(parse_command("EXIT").expect("command"), WizardCommand::Quit);
    let err = parse_command("type").expect_err("missing tag");
    assert_eq!(err.to_string(), "usage: type <document type>");
}
