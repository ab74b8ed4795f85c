//! Parses term ids given on the command line and prints their fields.

use terms_client::TermId;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: parse_term <term id>...");
        std::process::exit(2);
    }

    let mut failed = false;
    for arg in &args {
        match TermId::parse(arg) {
            Ok(id) => {
                println!("{}", id);
                if !id.tenant.is_empty() {
                    println!("  tenant:   {}", id.tenant);
                }
                if id.is_owned() {
                    println!("  owner:    {}", id.owner);
                }
                println!("  name:     {}", id.name);
                if id.has_revision() {
                    println!("  revision: {}", id.revision);
                } else {
                    println!("  revision: latest");
                }
            }
            Err(e) => {
                println!("{}: {}", arg, e);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}
