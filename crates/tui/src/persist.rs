use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use cmdbox_core::book::Contact;
use tracing::warn;

pub fn contacts_path(data_dir: &Path) -> PathBuf {
    data_dir.join("contacts.jsonl")
}

pub fn load_contacts(data_dir: &Path) -> Result<Vec<Contact>> {
    let path = contacts_path(data_dir);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(&path)
        .with_context(|| format!("read contacts file: {}", path.display()))?;
    let mut out = Vec::new();
    for (n, line) in data.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Contact>(line) {
            Ok(c) => out.push(c),
            Err(e) => warn!(target: "tui", "skip contacts line {}: {}", n + 1, e),
        }
    }
    Ok(out)
}

pub fn save_contacts(data_dir: &Path, contacts: &[Contact]) -> Result<()> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("create data dir: {}", data_dir.display()))?;
    let path = contacts_path(data_dir);
    let mut tmp = path.clone();
    tmp.set_extension("jsonl.tmp");
    {
        let mut f =
            fs::File::create(&tmp).with_context(|| format!("create tmp: {}", tmp.display()))?;
        for c in contacts {
            let line = serde_json::to_string(c)?;
            f.write_all(line.as_bytes())?;
            f.write_all(b"\n")?;
        }
        f.flush()?;
    }
    fs::rename(&tmp, &path).with_context(|| format!("persist contacts to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(load_contacts(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn saved_contacts_load_back_and_bad_lines_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("data");
        let mut ann = Contact::named("Ann Lee");
        ann.tags.insert("work".into());
        save_contacts(&dir, &[ann.clone(), Contact::named("Bo")]).unwrap();

        let mut raw = fs::read_to_string(contacts_path(&dir)).unwrap();
        raw.push_str("{not json\n\n");
        fs::write(contacts_path(&dir), raw).unwrap();

        let loaded = load_contacts(&dir).unwrap();
        assert_eq!(loaded, vec![ann, Contact::named("Bo")]);
    }
}
