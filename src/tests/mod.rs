// Copyright 2015 Axel Rasmussen
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#[cfg(test)]
mod help;
#[cfg(test)]
mod main_impl;
#[cfg(test)]
mod registry;

#[test]
fn test_all_tests_initialize_library() {
    use std::io::BufRead;

    crate::init().unwrap();

    // Every test is expected to initialize the library (so log output from the
    // code under test is filtered the same way it would be in a real program).
    // It's easy to forget, so this test reads our test sources and checks that
    // the number of "#[test]" lines matches the number of init calls.

    let src_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    assert!(
        src_dir.is_dir(),
        "expected src/ directory to exist: {}",
        src_dir.display()
    );

    let mut nr_files = 0;
    let mut dirs = vec![src_dir.join("tests")];
    while let Some(dir) = dirs.pop() {
        for entry in std::fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();

            let has_rs_extension = path.extension().map_or(false, |e| e == "rs");
            if has_rs_extension && path.is_file() {
                nr_files += 1;

                let file = std::fs::File::open(&path).unwrap();
                let reader = std::io::BufReader::new(file);

                let mut nr_tests = 0;
                let mut nr_inits = 0;

                for line in reader.lines() {
                    let line = line.unwrap();
                    let trimmed = line.trim();

                    if trimmed == "#[test]" {
                        nr_tests += 1;
                    } else if trimmed == "crate::init().unwrap();" {
                        nr_inits += 1;
                    }
                }

                assert_eq!(
                    nr_tests,
                    nr_inits,
                    "expected file {} to have matching test ({}) and init() ({}) counts",
                    path.display(),
                    nr_tests,
                    nr_inits
                );
            } else if path.is_dir() {
                dirs.push(path);
            }
        }
    }

    assert!(nr_files > 0, "expected to find > 0 test source files");
}
