//! Server-rendered HTML pages.
//!
//! Every user-supplied value passes through [`esc`] before it reaches the
//! markup.

use std::{borrow::Cow, fmt::Write as _};

use rolo_core::contact::Contact;

fn esc(raw: &str) -> Cow<'_, str> { quick_xml::escape::escape(raw) }

fn page(title: &str, flashes: &[String], body: &str) -> String {
  let mut notices = String::new();
  if !flashes.is_empty() {
    notices.push_str("<ul class=\"flashes\">\n");
    for message in flashes {
      let _ = writeln!(notices, "<li>{}</li>", esc(message));
    }
    notices.push_str("</ul>\n");
  }

  format!(
    "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<title>{title}</title>
</head>
<body>
<h1>{title}</h1>
{notices}{body}
</body>
</html>
",
    title = esc(title),
  )
}

fn credentials_form(action: &str, submit: &str) -> String {
  format!(
    "<form method=\"post\" action=\"{action}\">
<label>Username <input type=\"text\" name=\"username\" required></label>
<label>Password <input type=\"password\" name=\"password\" required></label>
<button type=\"submit\">{submit}</button>
</form>
"
  )
}

fn contact_form(action: &str, submit: &str, name: &str, phone: &str, email: &str) -> String {
  format!(
    "<form method=\"post\" action=\"{action}\">
<label>Name <input type=\"text\" name=\"name\" value=\"{name}\"></label>
<label>Phone <input type=\"text\" name=\"phone\" value=\"{phone}\"></label>
<label>Email <input type=\"text\" name=\"email\" value=\"{email}\"></label>
<button type=\"submit\">{submit}</button>
</form>
<p><a href=\"/\">Back to contacts</a></p>
",
    name = esc(name),
    phone = esc(phone),
    email = esc(email),
  )
}

pub fn login(flashes: &[String]) -> String {
  let body = credentials_form("/login", "Log in")
    + "<p>No account? <a href=\"/register\">Register</a></p>\n";
  page("Login", flashes, &body)
}

pub fn register(flashes: &[String]) -> String {
  let body = credentials_form("/register", "Register")
    + "<p>Already registered? <a href=\"/login\">Log in</a></p>\n";
  page("Register", flashes, &body)
}

pub fn index(
  username: &str,
  contacts: &[Contact],
  search: Option<&str>,
  flashes: &[String],
) -> String {
  let mut body = format!(
    "<p>Logged in as {user}. <a href=\"/logout\">Log out</a></p>
<form method=\"get\" action=\"/\">
<input type=\"text\" name=\"search\" placeholder=\"Search contacts\" value=\"{search}\">
<button type=\"submit\">Search</button>
</form>
<p><a href=\"/add\">Add contact</a></p>
",
    user = esc(username),
    search = esc(search.unwrap_or_default()),
  );

  if contacts.is_empty() {
    body.push_str("<p>No contacts found.</p>\n");
  } else {
    body.push_str(
      "<table>\n<tr><th>Name</th><th>Phone</th><th>Email</th><th></th></tr>\n",
    );
    for c in contacts {
      let _ = writeln!(
        body,
        "<tr><td>{}</td><td>{}</td><td>{}</td>\
         <td><a href=\"/edit/{id}\">Edit</a> <a href=\"/delete/{id}\">Delete</a></td></tr>",
        esc(&c.name),
        esc(&c.phone),
        esc(&c.email),
        id = c.id,
      );
    }
    body.push_str("</table>\n");
  }

  page("Contacts", flashes, &body)
}

pub fn add_contact(flashes: &[String]) -> String {
  page("Add Contact", flashes, &contact_form("/add", "Add", "", "", ""))
}

pub fn edit_contact(contact: &Contact, flashes: &[String]) -> String {
  let action = format!("/edit/{}", contact.id);
  let form = contact_form(&action, "Save", &contact.name, &contact.phone, &contact.email);
  page("Edit Contact", flashes, &form)
}
