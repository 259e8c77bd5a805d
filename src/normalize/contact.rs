use crate::models::Contact;

/// Sort the unlabeled links of the contact info overlay into profile URL and
/// e-mail. Later matches overwrite earlier ones; other links are dropped.
pub fn classify_links<S: AsRef<str>>(links: &[S]) -> Contact {
    let mut contact = Contact::default();

    for link in links {
        let link: &str = link.as_ref();
        if link.contains("linkedin") {
            contact.profile_url = Some(link.to_string());
        } else if link.contains('@') {
            let email = link.strip_prefix("mailto:").unwrap_or(link);
            contact.email = Some(email.to_string());
        }
    }

    contact
}
