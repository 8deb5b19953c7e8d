//! Line-oriented command shell over `RegistryApp`.
//!
//! Form commands take `|`-separated fields, write them into the form and then
//! fire the form's submit (or update) handler, the same way a click would.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use registry_core::{AdminButton, Confirm, RecordId, RegistryApp, RowAction, Transport};

use crate::render;

pub const HELP: &str = "\
Commands:
  help                                          show this text
  show                                          redraw the page
  breed <id|none>                               pick a breed in the pet form
  tutor <name> | <email> | <phone>              identify or register a tutor
  pet <name> | <breed id> | <age> | <weight> | <notes>
                                                register a dog
  logout                                        end the session
  dogs | tutors                                 open an admin list
  view-dog <id> | edit-dog <id> | delete-dog <id>
  update-dog [<name> | <breed id> | <age> | <weight> | <notes>]
  remove-dog                                    delete the dog being edited
  view-tutor <id> | edit-tutor <id> | delete-tutor <id>
  update-tutor [<name> | <email> | <phone>]
  remove-tutor                                  delete the tutor being edited
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorFields {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetFields {
    pub name: String,
    pub breed: Option<RecordId>,
    pub age: String,
    pub weight: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Show,
    Breed(Option<RecordId>),
    Tutor(TutorFields),
    Pet(PetFields),
    Logout,
    Admin(AdminButton),
    DogAction(RowAction, RecordId),
    UpdateDog(Option<PetFields>),
    RemoveDog,
    TutorAction(RowAction, RecordId),
    UpdateTutor(Option<TutorFields>),
    RemoveTutor,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("`{0}` needs an id")]
    MissingId(&'static str),
    #[error("`{0}` is not a valid id")]
    InvalidId(String),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "help" | "?" => Command::Help,
        "show" => Command::Show,
        "breed" => Command::Breed(parse_breed(rest)?),
        "tutor" => Command::Tutor(tutor_fields(rest)),
        "pet" => Command::Pet(pet_fields(rest)?),
        "logout" => Command::Logout,
        "dogs" => Command::Admin(AdminButton::Dogs),
        "tutors" => Command::Admin(AdminButton::Tutors),
        "view-dog" => Command::DogAction(RowAction::View, parse_id("view-dog", rest)?),
        "edit-dog" => Command::DogAction(RowAction::Edit, parse_id("edit-dog", rest)?),
        "delete-dog" => Command::DogAction(RowAction::Delete, parse_id("delete-dog", rest)?),
        "update-dog" if rest.is_empty() => Command::UpdateDog(None),
        "update-dog" => Command::UpdateDog(Some(pet_fields(rest)?)),
        "remove-dog" => Command::RemoveDog,
        "view-tutor" => Command::TutorAction(RowAction::View, parse_id("view-tutor", rest)?),
        "edit-tutor" => Command::TutorAction(RowAction::Edit, parse_id("edit-tutor", rest)?),
        "delete-tutor" => Command::TutorAction(RowAction::Delete, parse_id("delete-tutor", rest)?),
        "update-tutor" if rest.is_empty() => Command::UpdateTutor(None),
        "update-tutor" => Command::UpdateTutor(Some(tutor_fields(rest))),
        "remove-tutor" => Command::RemoveTutor,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_id(command: &'static str, raw: &str) -> Result<RecordId, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::MissingId(command));
    }
    raw.parse()
        .map_err(|_| ParseError::InvalidId(raw.to_string()))
}

fn parse_breed(raw: &str) -> Result<Option<RecordId>, ParseError> {
    match raw {
        "" | "none" => Ok(None),
        id => id
            .parse()
            .map(Some)
            .map_err(|_| ParseError::InvalidId(id.to_string())),
    }
}

/// Split on `|`; missing trailing fields are empty.
fn fields<const N: usize>(raw: &str) -> [String; N] {
    let mut parts = raw.split('|').map(|p| p.trim().to_string());
    std::array::from_fn(|_| parts.next().unwrap_or_default())
}

fn tutor_fields(raw: &str) -> TutorFields {
    let [full_name, email, phone] = fields(raw);
    TutorFields {
        full_name,
        email,
        phone,
    }
}

fn pet_fields(raw: &str) -> Result<PetFields, ParseError> {
    let [name, breed, age, weight, notes] = fields(raw);
    Ok(PetFields {
        name,
        breed: parse_breed(&breed)?,
        age,
        weight,
        notes,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run one command against the app.
pub fn dispatch<T: Transport, C: Confirm>(app: &mut RegistryApp<T, C>, command: Command) -> Flow {
    match command {
        Command::Help | Command::Show => {}
        Command::Breed(id) => app.select_breed(id),
        Command::Tutor(fields) => {
            write_tutor(app, fields);
            app.submit_tutor();
        }
        Command::Pet(fields) => {
            write_pet(app, fields);
            app.submit_pet();
        }
        Command::Logout => app.logout(),
        Command::Admin(button) => app.admin(button),
        Command::DogAction(action, id) => app.dog_row(action, id),
        Command::UpdateDog(fields) => {
            if let Some(fields) = fields {
                write_pet(app, fields);
            }
            app.update_dog();
        }
        Command::RemoveDog => app.delete_edited_dog(),
        Command::TutorAction(action, id) => app.tutor_row(action, id),
        Command::UpdateTutor(fields) => {
            if let Some(fields) = fields {
                write_tutor(app, fields);
            }
            app.update_tutor();
        }
        Command::RemoveTutor => app.delete_edited_tutor(),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

fn write_tutor<T: Transport, C: Confirm>(app: &mut RegistryApp<T, C>, fields: TutorFields) {
    let form = app.tutor_form_mut();
    form.full_name = fields.full_name;
    form.email = fields.email;
    form.phone = fields.phone;
}

fn write_pet<T: Transport, C: Confirm>(app: &mut RegistryApp<T, C>, fields: PetFields) {
    let form = app.pet_form_mut();
    form.name = fields.name;
    form.age = fields.age;
    form.weight = fields.weight;
    form.notes = fields.notes;
    form.breed.select(fields.breed);
}

/// Read commands from stdin until `quit` or end of input.
///
/// Stdin is locked one line at a time so confirmation prompts can read from
/// it too.
pub fn run<T: Transport, C: Confirm>(app: &mut RegistryApp<T, C>) -> io::Result<()> {
    let mut out = io::stdout();
    writeln!(out, "{}", render::page(app, Instant::now()))?;
    writeln!(out, "Type `help` for the list of commands.")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        tracing::debug!(?command, "dispatching");

        if command == Command::Help {
            writeln!(out, "{HELP}")?;
            continue;
        }
        if dispatch(app, command) == Flow::Quit {
            return Ok(());
        }
        writeln!(out, "{}", render::page(app, Instant::now()))?;
    }
}

/// Answers confirmation prompts from stdin.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        let mut out = io::stdout();
        if write!(out, "{prompt} [y/N] ").and_then(|()| out.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                tracing::warn!(error = %err, "could not read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
