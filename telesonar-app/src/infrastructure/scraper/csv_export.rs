use crate::domain::TrendingRepo;

const HEADER: &[&str] = &[
    "rank",
    "name",
    "url",
    "description",
    "language",
    "stars",
    "forks",
    "stars_period",
];

/// Renders repos as RFC 4180 CSV with a header row. No repos, no bytes.
pub fn trending_to_csv(repos: &[TrendingRepo]) -> Vec<u8> {
    if repos.is_empty() {
        return Vec::new();
    }

    let mut out = String::new();
    push_row(&mut out, HEADER.iter().copied());

    for repo in repos {
        let rank = repo.rank.to_string();
        push_row(
            &mut out,
            [
                rank.as_str(),
                repo.name.as_str(),
                repo.url.as_str(),
                repo.description.as_str(),
                repo.language.as_str(),
                repo.stars.as_str(),
                repo.forks.as_str(),
                repo.stars_period.as_str(),
            ],
        );
    }

    out.into_bytes()
}

fn push_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(description: &str) -> TrendingRepo {
        TrendingRepo {
            rank: 1,
            name: "a/b".to_string(),
            url: "https://github.com/a/b".to_string(),
            description: description.to_string(),
            language: "Rust".to_string(),
            stars: "10".to_string(),
            forks: "2".to_string(),
            stars_period: "3 stars today".to_string(),
        }
    }

    #[test]
    fn test_empty_export() {
        assert!(trending_to_csv(&[]).is_empty());
    }

    #[test]
    fn test_header_and_row() {
        let csv = String::from_utf8(trending_to_csv(&[repo("fast")])).unwrap();
        assert_eq!(
            csv,
            "rank,name,url,description,language,stars,forks,stars_period\r\n\
             1,a/b,https://github.com/a/b,fast,Rust,10,2,3 stars today\r\n"
        );
    }

    #[test]
    fn test_quoting() {
        let csv = String::from_utf8(trending_to_csv(&[repo("say \"hi\", then\nleave")])).unwrap();
        assert!(csv.contains(",\"say \"\"hi\"\", then\nleave\","));
    }
}
