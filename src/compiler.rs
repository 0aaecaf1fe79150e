//! Directory-level driver: load every list, compile, write the artifacts.

use std::fs;
use std::path::Path;

use prost::Message;
use walkdir::WalkDir;

use crate::canonical::{to_geoip, to_geosite};
use crate::config::CompilerConfig;
use crate::emitter::{CategoryIndex, PacList};
use crate::entry::FileClass;
use crate::loader::load_file;
use crate::proto::{GeoIpList, GeoSiteList};
use crate::resolver::{resolve, Registry};
use crate::{Error, Result};

/// Serialized GeoSiteList output.
pub const SITE_FILE: &str = "v2site.dat";
/// Serialized GeoIPList output.
pub const IP_FILE: &str = "v2ip.dat";
/// Category index output.
pub const MAP_FILE: &str = "v2map.txt";
/// PAC-style rule list output.
pub const YAML_FILE: &str = "v2yaml.yaml";

/// Outcome of walking the data directory.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub registry: Registry,
    /// Files that failed to load and were left out
    pub skipped: usize,
    /// Lists replaced by a later file with the same base name
    pub replaced: usize,
}

/// Walk `data_path` recursively and load every file into a registry.
///
/// Files that fail to load are logged and skipped. A missing data path or a
/// walk error fails the whole load.
pub fn load_dir(data_path: &Path) -> Result<LoadReport> {
    if !data_path.exists() {
        return Err(Error::DataPathNotFound(data_path.display().to_string()));
    }

    let mut report = LoadReport::default();
    for entry in WalkDir::new(data_path) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        let list = match load_file(entry.path()) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("Skipping {:?}: {}", entry.path(), e);
                report.skipped += 1;
                continue;
            }
        };

        log::debug!(
            "Loaded {} ({} entries) from {:?}",
            list.name,
            list.entries.len(),
            entry.path()
        );
        let name = list.name.clone();
        if report.registry.insert(list).is_some() {
            log::warn!("{} loaded twice, keeping {:?}", name, entry.path());
            report.replaced += 1;
        }
    }

    Ok(report)
}

/// Everything produced by one compiler run.
#[derive(Debug, Default)]
pub struct Compilation {
    pub sites: GeoSiteList,
    pub ips: GeoIpList,
    pub index: CategoryIndex,
    pub pac: PacList,
}

impl Compilation {
    /// Total number of domain rules across all GeoSite entries.
    pub fn domain_count(&self) -> usize {
        self.sites.entry.iter().map(|s| s.domain.len()).sum()
    }

    /// Total number of CIDRs across all GeoIP entries.
    pub fn cidr_count(&self) -> usize {
        self.ips.entry.iter().map(|ip| ip.cidr.len()).sum()
    }

    /// Write the four output files into `dir`.
    ///
    /// A failed write is logged and does not stop the remaining ones; the
    /// first failure is returned once every file has been attempted.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        let outputs: [(&str, Vec<u8>); 4] = [
            (SITE_FILE, self.sites.encode_to_vec()),
            (IP_FILE, self.ips.encode_to_vec()),
            (MAP_FILE, self.index.to_string().into_bytes()),
            (YAML_FILE, self.pac.to_string().into_bytes()),
        ];

        let mut first_error = None;
        for (name, bytes) in outputs {
            let path = dir.join(name);
            match fs::write(&path, &bytes) {
                Ok(()) => log::info!("Wrote {:?} ({} bytes)", path, bytes.len()),
                Err(e) => {
                    log::error!("Failed: writing {:?}: {}", path, e);
                    if first_error.is_none() {
                        first_error = Some(Error::Io(e));
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Resolve and canonicalize every list in the registry.
///
/// A missing include target or a site entry with no GeoSite counterpart
/// fails the whole compilation.
pub fn compile(registry: &Registry) -> Result<Compilation> {
    let mut out = Compilation::default();

    for list in registry.lists() {
        out.index.record(list);
        out.pac.record(list);

        let resolved = resolve(list, registry)?;
        match list.class {
            FileClass::Site => out.sites.entry.push(to_geosite(&resolved)?),
            FileClass::Ip => out.ips.entry.push(to_geoip(&resolved)),
        }
    }

    Ok(out)
}

/// Run the full pipeline for `config`: load, compile, write.
pub fn run(config: &CompilerConfig) -> Result<Compilation> {
    let report = load_dir(&config.data_path)?;
    log::info!(
        "Loaded {} lists from {:?} ({} skipped)",
        report.registry.len(),
        config.data_path,
        report.skipped
    );

    let compilation = compile(&report.registry)?;
    compilation.write_to(&config.output_dir)?;
    Ok(compilation)
}

/// Decode a `v2site.dat` file.
pub fn read_site_list(path: &Path) -> Result<GeoSiteList> {
    let bytes = fs::read(path)?;
    Ok(GeoSiteList::decode(bytes.as_slice())?)
}

/// Decode a `v2ip.dat` file.
pub fn read_ip_list(path: &Path) -> Result<GeoIpList> {
    let bytes = fs::read(path)?;
    Ok(GeoIpList::decode(bytes.as_slice())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{Entry, EntryKind, RawList};

    fn raw(name: &str, class: FileClass, entries: &[(EntryKind, &str)]) -> RawList {
        let mut list = RawList::new(name, class);
        list.entries = entries
            .iter()
            .map(|(kind, value)| Entry::new(*kind, *value))
            .collect();
        list
    }

    #[test]
    fn test_compile_mixed_registry() {
        let registry: Registry = vec![
            raw("A-SITE", FileClass::Site, &[(EntryKind::Include, "b-site")]),
            raw("B-SITE", FileClass::Site, &[(EntryKind::Domain, "foo.com")]),
            raw("X-IP", FileClass::Ip, &[(EntryKind::Ip, "10.0.0.0/8")]),
        ]
        .into_iter()
        .collect();

        let out = compile(&registry).unwrap();
        assert_eq!(out.sites.entry.len(), 2);
        assert_eq!(out.ips.entry.len(), 1);
        assert_eq!(out.domain_count(), 2);
        assert_eq!(out.cidr_count(), 1);
        assert_eq!(out.index.site.len(), 2);
        assert_eq!(out.index.ip, vec!["x-ip".to_string()]);

        let a = out
            .sites
            .entry
            .iter()
            .find(|s| s.country_code == "A-SITE")
            .unwrap();
        assert_eq!(a.domain.len(), 1);
        assert_eq!(a.domain[0].value, "foo.com");
    }

    #[test]
    fn test_compile_fails_on_missing_include() {
        let registry: Registry = vec![raw(
            "A-SITE",
            FileClass::Site,
            &[(EntryKind::Include, "nope")],
        )]
        .into_iter()
        .collect();

        let err = compile(&registry).unwrap_err();
        assert!(err.to_string().contains("nope not found"));
    }

    #[test]
    fn test_compile_fails_on_site_including_ip_list() {
        let registry: Registry = vec![
            raw("A-SITE", FileClass::Site, &[(EntryKind::Include, "x-ip")]),
            raw("X-IP", FileClass::Ip, &[(EntryKind::Ip, "1.1.1.1")]),
        ]
        .into_iter()
        .collect();

        assert!(matches!(
            compile(&registry),
            Err(Error::UnknownDomainType(_))
        ));
    }

    #[test]
    fn test_load_dir_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dir(&dir.path().join("nowhere")).unwrap_err();
        assert!(matches!(err, Error::DataPathNotFound(_)));
    }

    #[test]
    fn test_load_dir_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good-site"), "a.com\n").unwrap();
        fs::write(dir.path().join("bad-site"), "a:b:c\n").unwrap();

        let report = load_dir(dir.path()).unwrap();
        assert_eq!(report.registry.len(), 1);
        assert_eq!(report.skipped, 1);
        assert!(report.registry.get("GOOD-SITE").is_some());
    }

    #[test]
    fn test_load_dir_name_collision() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("one")).unwrap();
        fs::create_dir(dir.path().join("two")).unwrap();
        fs::write(dir.path().join("one/dup-site"), "a.com\n").unwrap();
        fs::write(dir.path().join("two/dup-site"), "b.com\n").unwrap();

        let report = load_dir(dir.path()).unwrap();
        assert_eq!(report.registry.len(), 1);
        assert_eq!(report.replaced, 1);
    }

    #[test]
    fn test_write_to_missing_dir_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = Compilation::default();
        let err = out.write_to(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
