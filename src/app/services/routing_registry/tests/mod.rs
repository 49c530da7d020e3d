//! Shared test utilities and fixtures for routing registry tests

use std::fs;
use std::path::{Path, PathBuf};


/// Write a reference CSV with the production header layout
pub fn create_test_registry_file(dir: &Path, filename: &str) -> std::io::Result<PathBuf> {
    let file_path = dir.join(filename);

    let content = "\
IFSC,BANK,BRANCH,CENTRE,DISTRICT,STATE,ADDRESS,CITY
SBIN0070025,State Bank,Chavara,Kollam,Kollam,Kerala,\"Main road, Chavara, Kollam\",Chavara
SBIN0070026,State Bank,Karunagappally,Kollam,Kollam,Kerala,\"NH bypass, Karunagappally\",Karunagappally
FDRL0001111,Federal Bank,Aluva IMPS,Ernakulam,Ernakulam,Kerala,\"Bank junction, Aluva, Ernakulam\",Aluva
,Orphan Bank,No Code,Kollam,Kollam,Kerala,row without a code,Nowhere
SBIN0070025,State Bank,Chavara Duplicate,Kollam,Kollam,Kerala,duplicate code row,Chavara
";

    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Codes the standard test registry file indexes
pub const TEST_CODES: &[&str] = &["SBIN0070025", "SBIN0070026", "FDRL0001111"];
