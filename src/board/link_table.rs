use uuid::Uuid;
use serde::{Serialize, Deserialize};

pub type LinkId = Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LinkTable {
    pub links: Vec<Link>,
}

impl LinkTable {
    pub fn new() -> Self {
        LinkTable { links: Vec::new() }
    }

    pub fn with_sample_links() -> Self {
        let mut table = Self::new();
        table.add_link("Google", "https://www.google.com");
        table.add_link("GitHub", "https://www.github.com");
        table
    }

    // Both name and url are required
    pub fn add_link(&mut self, name: &str, url: &str) -> Option<LinkId> {
        let (name, url) = (name.trim(), url.trim());
        if name.is_empty() || url.is_empty() {
            return None;
        }
        let id = Uuid::now_v7();
        log::debug!("link added: {} -> {}", name, url);
        self.links.push(Link { id, name: name.to_string(), url: url.to_string() });
        Some(id)
    }

    pub fn remove_link(&mut self, id: LinkId) -> bool {
        let before = self.links.len();
        self.links.retain(|l| l.id != id);
        self.links.len() != before
    }

    pub fn update_link(&mut self, id: LinkId, name: &str, url: &str) -> bool {
        let (name, url) = (name.trim(), url.trim());
        if name.is_empty() || url.is_empty() {
            return false;
        }
        if let Some(link) = self.links.iter_mut().find(|l| l.id == id) {
            link.name = name.to_string();
            link.url = url.to_string();
            true
        } else {
            false
        }
    }

    pub fn get_link(&self, id: LinkId) -> Option<&Link> { self.links.iter().find(|l| l.id == id) }
    pub fn len(&self) -> usize { self.links.len() }
    pub fn is_empty(&self) -> bool { self.links.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &Link> { self.links.iter() }
}
