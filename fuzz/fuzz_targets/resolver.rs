#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spylog_tasks_reporter::resolve;

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    source_dir: String,
    workspace_root: String,
}

fuzz_target!(|input: FuzzInput| {
    let resolution = resolve(&input.source_dir, &input.workspace_root);

    // 결과는 항상 구분자로 시작하지 않는 상대 경로이며 빈 세그먼트가 없어야 합니다
    let rel = &resolution.relative_path;
    if !rel.is_empty() {
        assert!(!rel.starts_with(['/', '\\']));
        assert!(rel.split(['/', '\\']).all(|s| !s.is_empty() && s != "."));
    }
});
