//! Streamed copy and move integration tests.

#[path = "../common/mod.rs"]
mod common;

use common::{TestFixture, pattern};
use fskit::{CopyProgress, Error, StreamOptions, stream};
use rstest::rstest;
use std::fs;
use tokio::sync::{mpsc, watch};

#[tokio::test]
async fn test_2050_byte_file_reports_three_snapshots() {
    let fixture = TestFixture::new();
    let src = fixture.write_src("src.bin", pattern(2050));
    let dst = fixture.dst.path().join("dst.bin");

    let mut snapshots = Vec::new();
    let bytes = stream::copy_file_with_progress(
        &src,
        &dst,
        &StreamOptions::default(),
        |p: CopyProgress| snapshots.push(p),
    )
    .await
    .unwrap();

    assert_eq!(bytes, 2050);
    assert_eq!(
        snapshots,
        vec![
            CopyProgress {
                bytes_copied: 1024,
                total_bytes: 2050
            },
            CopyProgress {
                bytes_copied: 2048,
                total_bytes: 2050
            },
            CopyProgress {
                bytes_copied: 2050,
                total_bytes: 2050
            },
        ]
    );
    assert_eq!(fs::read(&dst).unwrap(), pattern(2050));
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(63, 1)]
#[case(64, 1)]
#[case(65, 2)]
#[case(640, 10)]
#[case(645, 11)]
#[tokio::test]
async fn test_chunk_boundaries(#[case] len: usize, #[case] chunks: usize) {
    let fixture = TestFixture::new();
    let src = fixture.write_src("src.bin", pattern(len));
    let dst = fixture.dst.path().join("dst.bin");

    let (tx, mut rx) = mpsc::unbounded_channel::<CopyProgress>();
    let options = StreamOptions::default().with_chunk_size(64);
    let bytes = stream::copy_file_with_progress(&src, &dst, &options, tx)
        .await
        .unwrap();

    let mut seen = Vec::new();
    while let Some(p) = rx.recv().await {
        seen.push(p);
    }

    assert_eq!(bytes, len as u64);
    assert_eq!(seen.len(), chunks);
    assert!(seen.windows(2).all(|w| w[0].bytes_copied < w[1].bytes_copied));
    assert!(seen.iter().all(|p| p.bytes_copied <= p.total_bytes));
    if let Some(last) = seen.last() {
        assert!(last.is_complete());
    }
    assert_eq!(fs::read(&dst).unwrap(), pattern(len));
}

#[tokio::test]
async fn test_watch_sink_holds_final_snapshot() {
    let fixture = TestFixture::new();
    let src = fixture.write_src("src.bin", pattern(5000));
    let dst = fixture.dst.path().join("dst.bin");

    let (tx, rx) = watch::channel(CopyProgress::default());
    stream::copy_file_with_progress(&src, &dst, &StreamOptions::default(), tx)
        .await
        .unwrap();

    assert_eq!(rx.borrow().bytes_copied, 5000);
    assert!(rx.borrow().is_complete());
}

#[tokio::test]
async fn test_concurrent_transfers_interleave() {
    let fixture = TestFixture::new();
    let a = fixture.write_src("a.bin", pattern(10_000));
    let b = fixture.write_src("b.bin", pattern(7_000));
    let options = StreamOptions::default();

    let dst_a = fixture.dst.path().join("a.bin");
    let dst_b = fixture.dst.path().join("b.bin");
    let (ra, rb) = tokio::join!(
        stream::copy_file(&a, &dst_a, &options),
        stream::copy_file(&b, &dst_b, &options),
    );

    assert_eq!(ra.unwrap(), 10_000);
    assert_eq!(rb.unwrap(), 7_000);
}

#[tokio::test]
async fn test_move_file() {
    let fixture = TestFixture::new();
    let src = fixture.write_src("move/me.txt", "moving");
    let dst = fixture.dst.path().join("moved.txt");

    let bytes = stream::move_file(&src, &dst, &StreamOptions::default())
        .await
        .unwrap();

    assert_eq!(bytes, 6);
    assert!(!src.exists());
    fixture.assert_file_content(&dst, "moving");
}

// an open file can be unlinked only on unix
#[cfg(unix)]
#[tokio::test]
async fn test_move_keeps_complete_copy_when_source_cannot_be_deleted() {
    let fixture = TestFixture::new();
    let src = fixture.write_src("stuck.bin", pattern(3000));
    let dst = fixture.dst.path().join("stuck.bin");

    // swap the source for a directory mid-copy so the final delete fails
    let swap = src.clone();
    let mut swapped = false;
    let result = stream::move_file_with_progress(
        &src,
        &dst,
        &StreamOptions::default(),
        move |_: CopyProgress| {
            if !swapped {
                fs::remove_file(&swap).unwrap();
                fs::create_dir(&swap).unwrap();
                swapped = true;
            }
        },
    )
    .await;

    match result {
        Err(Error::SourceNotRemoved {
            src: kept, dst: written, ..
        }) => {
            assert_eq!(kept, src);
            assert_eq!(written, dst);
        }
        other => panic!("expected SourceNotRemoved, got {:?}", other),
    }
    assert!(src.is_dir());
    assert_eq!(fs::read(&dst).unwrap(), pattern(3000));
}

#[tokio::test]
async fn test_copy_never_overwrites() {
    let fixture = TestFixture::new();
    let src = fixture.write_src("src.txt", "new");
    let dst = fixture.dst.path().join("dst.txt");
    fs::write(&dst, "old").unwrap();

    let result = stream::copy_file(&src, &dst, &StreamOptions::default()).await;

    assert!(matches!(result, Err(Error::AlreadyExists(_))));
    fixture.assert_file_content(&dst, "old");
}

#[tokio::test]
async fn test_copy_missing_source() {
    let fixture = TestFixture::new();
    let result = stream::copy_file(
        &fixture.src.path().join("ghost"),
        &fixture.dst.path().join("ghost"),
        &StreamOptions::default(),
    )
    .await;

    assert!(matches!(result, Err(Error::SourceNotFound(_))));
}

#[cfg(feature = "progress")]
#[tokio::test]
async fn test_progress_bar_sink() {
    let fixture = TestFixture::new();
    let src = fixture.write_src("src.bin", pattern(3000));
    let dst = fixture.dst.path().join("dst.bin");

    let pb = fskit::create_progress_bar(3000);
    stream::copy_file_with_progress(&src, &dst, &StreamOptions::default(), pb.clone())
        .await
        .unwrap();

    assert_eq!(pb.position(), 3000);
}
