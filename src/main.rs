//! Command-line entry point.
//!
//! A thin driver over the service layer: it loads configuration, installs
//! the tracing subscriber, opens the storage backends once, and maps
//! subcommands onto service calls. All person commands act as an explicit
//! user id; there is no session handling here.
//!
//! # Usage
//!
//! ```text
//! people-manager list     <user-id>
//! people-manager add      <user-id> <name> [details]
//! people-manager show     <user-id> <person-id>
//! people-manager edit     <user-id> <person-id> <name>
//! people-manager note     <user-id> <person-id> <text>
//! people-manager search   <user-id> <query>
//! people-manager rm       <user-id> <person-id>
//! people-manager register <username> <password-hash>
//! ```
//!
//! Storage is selected by configuration: set `MONGO_URI` for MongoDB, or
//! leave it unset to use local JSON files (`data.json`, `users.json`).

use people_manager::services::{PersonService, UserService};
use people_manager::{observability, storage, Config, Person, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    observability::init_tracing(&config);
    config.validate();

    let stores = storage::open(&config)?;
    let people = PersonService::new(stores.people);
    let users = UserService::new(stores.users);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["list", user_id] => {
            let contacts = people.list(user_id)?;
            if contacts.is_empty() {
                println!("no contacts");
            }
            for person in &contacts {
                print_summary(person);
            }
        }
        ["add", user_id, name] => {
            let person = people.create(name, "", user_id)?;
            println!("created {}", person.id);
        }
        ["add", user_id, name, details] => {
            let person = people.create(name, details, user_id)?;
            println!("created {}", person.id);
        }
        ["show", user_id, person_id] => match people.get(person_id, user_id)? {
            Some(person) => print_full(&person),
            None => println!("not found"),
        },
        ["edit", user_id, person_id, name] => {
            match people.update(person_id, Some(name), None, user_id)? {
                Some(person) => println!("updated {}", person.id),
                None => println!("not found"),
            }
        }
        ["note", user_id, person_id, text] => {
            match people.append_note(person_id, text, user_id)? {
                Some(person) => println!("noted {}", person.id),
                None => println!("not found"),
            }
        }
        ["search", user_id, query] => {
            for person in &people.search(query, user_id)? {
                print_summary(person);
            }
        }
        ["rm", user_id, person_id] => {
            if people.delete(person_id, user_id)? {
                println!("deleted {person_id}");
            } else {
                println!("not found");
            }
        }
        ["register", username, password_hash] => {
            let user = users.register(username, password_hash)?;
            println!("registered {} ({})", user.username, user.id);
        }
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}

const USAGE: &str = "\
usage:
  people-manager list     <user-id>
  people-manager add      <user-id> <name> [details]
  people-manager show     <user-id> <person-id>
  people-manager edit     <user-id> <person-id> <name>
  people-manager note     <user-id> <person-id> <text>
  people-manager search   <user-id> <query>
  people-manager rm       <user-id> <person-id>
  people-manager register <username> <password-hash>";

fn print_summary(person: &Person) {
    println!("{}  {}", person.id, person.name);
}

fn print_full(person: &Person) {
    println!("id:         {}", person.id);
    println!("name:       {}", person.name);
    println!("owner:      {}", person.user_id);
    println!("created_at: {}", person.created_at);
    println!("updated_at: {}", person.updated_at);
    if !person.details.is_empty() {
        println!("details:\n{}", person.details);
    }
}
