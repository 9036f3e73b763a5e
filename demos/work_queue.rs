//! Work queue example: one dispatcher feeding a pool of workers, with a
//! second queue carrying results back. Shutdown is signalled in-band with
//! `None` sentinels, one per worker.

use std::sync::Arc;
use std::thread;
use std::time::Duration;
use turnq::Queue;

const NUM_WORKERS: usize = 4;
const NUM_JOBS: usize = 20;

fn main() {
    println!("Work Queue Example\n");

    let jobs = Arc::new(Queue::<Option<String>>::with_capacity(128).unwrap());
    let results = Arc::new(Queue::<String>::with_capacity(128).unwrap());

    let jobs_tx = jobs.clone();
    let dispatcher = thread::spawn(move || {
        for i in 0..NUM_JOBS {
            let job = format!("Job-{:02}", i);
            println!("Enqueued: {}", job);
            jobs_tx.send(Some(job));
            thread::sleep(Duration::from_millis(10));
        }
        for _ in 0..NUM_WORKERS {
            jobs_tx.send(None);
        }
        println!("All jobs enqueued.");
    });

    let mut workers = vec![];
    for worker_id in 0..NUM_WORKERS {
        let jobs_rx = jobs.clone();
        let results_tx = results.clone();

        workers.push(thread::spawn(move || {
            let mut processed = 0;
            while let Some(job) = jobs_rx.recv() {
                println!("Worker {} processing: {}", worker_id, job);
                thread::sleep(Duration::from_millis(50));
                results_tx.send(format!("{} -> completed by worker {}", job, worker_id));
                processed += 1;
            }
            println!("Worker {} done ({} jobs).", worker_id, processed);
        }));
    }

    dispatcher.join().unwrap();
    for w in workers {
        w.join().unwrap();
    }

    for _ in 0..NUM_JOBS {
        println!("Result: {}", results.recv());
    }

    assert!(jobs.is_empty());
    assert!(results.is_empty());
    println!("\nAll {} jobs completed.", NUM_JOBS);
}
