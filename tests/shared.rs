mod common;

use std::thread;

use muon_mem::SharedFileSystem;

#[test]
fn test_shared_across_threads() {
    let shared: SharedFileSystem = common::default_fs().into_shared();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let fs = shared.clone();
            thread::spawn(move || {
                for i in 0..2 {
                    let name = format!("t{}_{}", t, i);
                    fs.lock().create_file(&name, format!("from thread {}", t)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let fs = shared.lock();
    assert_eq!(fs.list_directory().unwrap().len(), 2 + 8);
    assert_eq!(fs.free_inode_slots(), 1);
    for t in 0..4 {
        for i in 0..2 {
            let name = format!("t{}_{}", t, i);
            assert_eq!(fs.read_to_string(&name).unwrap(), format!("from thread {}", t));
        }
    }
}
