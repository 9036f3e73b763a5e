//! Simple usage example

use std::sync::Arc;
use std::thread;
use turnq::Queue;

fn main() {
    println!("turnq - Simple Example\n");

    // Create a queue with 16 slots
    let queue = Arc::new(Queue::with_capacity(16).unwrap());

    let producer_queue = queue.clone();
    let consumer_queue = queue.clone();

    // Producer thread
    let producer = thread::spawn(move || {
        for i in 0..10 {
            let message = format!("Message {}", i);
            println!("Sending: {}", message);
            producer_queue.send(message);
        }
        println!("Producer finished!");
    });

    // Consumer thread
    let consumer = thread::spawn(move || {
        for _ in 0..10 {
            let message = consumer_queue.recv();
            println!("Received: {}", message);
        }
        println!("Consumer finished!");
    });

    producer.join().unwrap();
    consumer.join().unwrap();

    assert!(queue.is_empty());
    println!("\nExample completed successfully. Queue is empty.");
}
