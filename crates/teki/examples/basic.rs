fn main() {
    let square = "nodraw\nbackward 50\ndraw\nloop 4\nforward 100\nright 90\nloopend\n";
    let program = teki::transpile(square).unwrap();
    println!("{program}");
}
